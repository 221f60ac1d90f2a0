//! The mass function query.

use std::path::Path;

use hmf_core::{
    HmfError, MassRange, QueryProvenance, SchemaVersion, SimBox, SnapshotId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::hash::sha256_hex;
use crate::histogram::HistogramTable;
use crate::redshift::RedshiftTable;
use crate::serde::nan_as_null;
use crate::source::{DataSource, DirectorySource, TableKind};

/// Width in dex used to normalise differential densities.
pub const BIN_WIDTH: f64 = 0.1;

/// Normalisation width used for cumulative densities.
pub const CUMULATIVE_BIN_WIDTH: f64 = 1.0;

/// Inputs of a single mass function query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Lower log10 halo mass bound in Msun/h.
    #[serde(default = "QueryParams::default_log_mass_min")]
    pub log_mass_min: f64,
    /// Upper log10 halo mass bound in Msun/h.
    #[serde(default = "QueryParams::default_log_mass_max")]
    pub log_mass_max: f64,
    /// Requested redshift.
    #[serde(default)]
    pub redshift: f64,
    /// Return the density above each mass instead of per bin.
    #[serde(default)]
    pub cumulative: bool,
    /// Simulation box to read.
    #[serde(default = "QueryParams::default_sim_box")]
    pub sim_box: SimBox,
}

impl QueryParams {
    const fn default_log_mass_min() -> f64 {
        10.0
    }

    const fn default_log_mass_max() -> f64 {
        16.0
    }

    const fn default_sim_box() -> SimBox {
        SimBox::Small
    }

    /// Differential query over `[log_mass_min, log_mass_max)` at `redshift`.
    pub fn new(log_mass_min: f64, log_mass_max: f64, redshift: f64, sim_box: SimBox) -> Self {
        Self {
            log_mass_min,
            log_mass_max,
            redshift,
            cumulative: false,
            sim_box,
        }
    }

    /// Switches the query to cumulative densities.
    pub fn cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
        self
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(
            Self::default_log_mass_min(),
            Self::default_log_mass_max(),
            0.0,
            Self::default_sim_box(),
        )
    }
}

/// Number densities along a log-mass axis.
///
/// Differential densities are in halos per Gpc^3 per dex, cumulative
/// densities in halos per Gpc^3. Bins without data hold NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassFunction {
    /// Parameters the curve was computed for.
    pub params: QueryParams,
    /// Snapshot nearest the requested redshift.
    pub snapshot: SnapshotId,
    /// Tabulated redshift of `snapshot`.
    pub snapshot_redshift: f64,
    /// Simulation volume used for normalisation, in Gpc^3.
    pub volume_gpc3: f64,
    /// Bin width used for normalisation, in dex.
    pub bin_width: f64,
    /// Lower bin edges in log10 Msun/h, increasing in steps of 0.1.
    pub log_mass: Vec<f64>,
    /// Density per bin; NaN where the histogram has no entry.
    #[serde(with = "nan_as_null")]
    pub density: Vec<f64>,
    /// Digests of the tables the curve was computed from.
    pub provenance: QueryProvenance,
}

impl MassFunction {
    /// Number of mass bins.
    pub fn len(&self) -> usize {
        self.log_mass.len()
    }

    /// Returns true when the mass range covered no bins.
    pub fn is_empty(&self) -> bool {
        self.log_mass.is_empty()
    }

    /// `(log_mass, density)` pairs in increasing mass order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.log_mass
            .iter()
            .copied()
            .zip(self.density.iter().copied())
    }
}

/// Computes the halo mass function of `params.sim_box` at `params.redshift`.
///
/// Both tables are read from `source` on every call. Unknown boxes are
/// rejected while parsing [`SimBox`]; missing tables surface as
/// [`HmfError::NotFound`].
pub fn query<S: DataSource + ?Sized>(
    source: &S,
    params: &QueryParams,
) -> Result<MassFunction, HmfError> {
    trace!(?params, "mass function query");
    let sim_box = params.sim_box;
    let volume_gpc3 = sim_box.volume_gpc3();
    let range = MassRange::from_log_mass(params.log_mass_min, params.log_mass_max, sim_box)?;

    let histogram_bytes = source.read_table(sim_box, TableKind::Histogram)?;
    let mut histogram = HistogramTable::from_csv_bytes(&histogram_bytes)?;
    let redshift_bytes = source.read_table(sim_box, TableKind::Redshift)?;
    let redshifts = RedshiftTable::from_bytes(&redshift_bytes)?;

    let bin_width = if params.cumulative {
        histogram = histogram.into_cumulative(redshifts.snapshots(), range);
        CUMULATIVE_BIN_WIDTH
    } else {
        BIN_WIDTH
    };

    let (snapshot, snapshot_redshift) = redshifts.nearest(params.redshift)?;
    debug!(
        sim_box = %sim_box,
        snapshot = snapshot.as_raw(),
        snapshot_redshift,
        requested = params.redshift,
        bins = range.len(),
        "selected snapshot"
    );

    let log_mass = range.bins().map(|bin| bin.log_mass()).collect();
    let density = range
        .bins()
        .map(|bin| {
            histogram
                .get(snapshot, bin)
                .map_or(f64::NAN, |count| count / volume_gpc3 / bin_width)
        })
        .collect();

    Ok(MassFunction {
        params: *params,
        snapshot,
        snapshot_redshift,
        volume_gpc3,
        bin_width,
        log_mass,
        density,
        provenance: QueryProvenance {
            schema_version: SchemaVersion::default(),
            sim_box,
            histogram_sha256: sha256_hex(&histogram_bytes),
            redshift_sha256: sha256_hex(&redshift_bytes),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

/// Runs [`query`] against the tables stored in `data_dir`.
pub fn query_dir(data_dir: impl AsRef<Path>, params: &QueryParams) -> Result<MassFunction, HmfError> {
    query(&DirectorySource::new(data_dir.as_ref()), params)
}

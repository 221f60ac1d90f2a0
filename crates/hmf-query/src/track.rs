//! Density at a fixed mass bin followed across redshift.

use hmf_core::{HmfError, SimBox, SnapshotId, BINS_PER_DEX};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::query::{query, QueryParams};
use crate::source::DataSource;

/// One redshift sample of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Requested redshift.
    pub redshift: f64,
    /// Snapshot the query resolved to.
    pub snapshot: SnapshotId,
    /// Density of the bin starting at the track mass; `None` when the
    /// histogram has no entry or the box does not resolve the mass.
    pub density: Option<f64>,
}

/// Densities of a single mass bin across a list of redshifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedshiftTrack {
    /// Box the densities were read from.
    pub sim_box: SimBox,
    /// Lower edge of the tracked bin in log10 Msun/h.
    pub log_mass: f64,
    /// Whether densities are cumulative.
    pub cumulative: bool,
    /// Samples in the order the redshifts were given.
    pub points: Vec<TrackPoint>,
}

/// Runs a one-bin query at `log_mass` for every redshift in `redshifts`.
pub fn redshift_track<S: DataSource + ?Sized>(
    source: &S,
    sim_box: SimBox,
    log_mass: f64,
    redshifts: &[f64],
    cumulative: bool,
) -> Result<RedshiftTrack, HmfError> {
    let mut points = Vec::with_capacity(redshifts.len());
    for &redshift in redshifts {
        let params = QueryParams::new(log_mass, log_mass + 1.0 / BINS_PER_DEX, redshift, sim_box)
            .cumulative(cumulative);
        let curve = query(source, &params)?;
        let density = curve.density.first().copied().filter(|value| !value.is_nan());
        points.push(TrackPoint {
            redshift,
            snapshot: curve.snapshot,
            density,
        });
    }
    debug!(sim_box = %sim_box, log_mass, samples = points.len(), "built redshift track");
    Ok(RedshiftTrack {
        sim_box,
        log_mass,
        cumulative,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, TableKind};

    fn source() -> MemorySource {
        MemorySource::new()
            .with_table(
                SimBox::Small,
                TableKind::Histogram,
                "b,s,i,M,N\n0,0,2,110,400\n0,0,1,110,100\n",
            )
            .with_table(SimBox::Small, TableKind::Redshift, "2 0.0\n1 2.0\n0 5.0\n")
            .with_table(
                SimBox::Big,
                TableKind::Histogram,
                "b,s,i,M,N\n0,0,2,110,400\n",
            )
            .with_table(SimBox::Big, TableKind::Redshift, "2 0.0\n")
    }

    #[test]
    fn follows_snapshots_across_redshift() {
        let track = redshift_track(&source(), SimBox::Small, 11.0, &[0.0, 2.0, 5.0], false).unwrap();
        let volume = SimBox::Small.volume_gpc3();
        let snapshots: Vec<i64> = track.points.iter().map(|p| p.snapshot.as_raw()).collect();
        assert_eq!(snapshots, vec![2, 1, 0]);
        assert!((track.points[0].density.unwrap() - 400.0 / volume / 0.1).abs() < 1e-6);
        assert!((track.points[1].density.unwrap() - 100.0 / volume / 0.1).abs() < 1e-6);
        assert_eq!(track.points[2].density, None);
    }

    #[test]
    fn unresolved_mass_has_no_density() {
        let track = redshift_track(&source(), SimBox::Big, 11.0, &[0.0], false).unwrap();
        assert_eq!(track.points[0].density, None);
    }
}

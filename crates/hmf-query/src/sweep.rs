//! Batch evaluation of mass functions and redshift tracks.

use hmf_core::{ErrorInfo, HmfError, SimBox};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::info;

use crate::hash::stable_hash_string;
use crate::serde::from_yaml_slice;
use crate::query::{query, MassFunction, QueryParams};
use crate::source::DataSource;
use crate::track::{redshift_track, RedshiftTrack};

/// Redshift track settings of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPlan {
    /// Box the tracks are read from.
    #[serde(default = "TrackPlan::default_sim_box")]
    pub sim_box: SimBox,
    /// Lower bin edges, in log10 Msun/h, to follow across redshift.
    #[serde(default = "TrackPlan::default_masses")]
    pub masses: Vec<f64>,
}

impl TrackPlan {
    const fn default_sim_box() -> SimBox {
        SimBox::Small
    }

    fn default_masses() -> Vec<f64> {
        vec![10.0, 11.0, 12.0, 13.0]
    }
}

impl Default for TrackPlan {
    fn default() -> Self {
        Self {
            sim_box: Self::default_sim_box(),
            masses: Self::default_masses(),
        }
    }
}

/// Grid of queries to evaluate, loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Redshifts shared by curves and tracks.
    #[serde(default = "SweepPlan::default_redshifts")]
    pub redshifts: Vec<f64>,
    /// Boxes to compute mass function curves for.
    #[serde(default = "SweepPlan::default_boxes")]
    pub boxes: Vec<SimBox>,
    /// Cumulative modes to evaluate.
    #[serde(default = "SweepPlan::default_cumulative")]
    pub cumulative: Vec<bool>,
    /// Lower log-mass bound of every curve.
    #[serde(default = "SweepPlan::default_log_mass_min")]
    pub log_mass_min: f64,
    /// Upper log-mass bound of every curve.
    #[serde(default = "SweepPlan::default_log_mass_max")]
    pub log_mass_max: f64,
    /// Redshift tracks; omitted tracks use the defaults.
    #[serde(default)]
    pub tracks: TrackPlan,
}

impl SweepPlan {
    fn default_redshifts() -> Vec<f64> {
        vec![0.0, 0.5, 1.0, 2.0, 3.0, 4.5, 6.2, 8.0, 10.0, 15.0]
    }

    fn default_boxes() -> Vec<SimBox> {
        SimBox::ALL.to_vec()
    }

    fn default_cumulative() -> Vec<bool> {
        vec![false, true]
    }

    const fn default_log_mass_min() -> f64 {
        10.0
    }

    const fn default_log_mass_max() -> f64 {
        16.0
    }

    /// Parses a YAML plan. Unknown box names are invalid arguments.
    pub fn from_yaml(data: &[u8]) -> Result<Self, HmfError> {
        let value: Value = from_yaml_slice(data)?;
        for name in box_names(&value) {
            name.parse::<SimBox>()?;
        }
        serde_yaml::from_value(value).map_err(|err| {
            HmfError::Serde(ErrorInfo::new("yaml_deserialize", err.to_string()))
        })
    }

    /// Query parameters of every curve, ordered by mode, redshift, then box.
    pub fn curve_params(&self) -> Vec<QueryParams> {
        let mut params = Vec::new();
        for &cumulative in &self.cumulative {
            for &redshift in &self.redshifts {
                for &sim_box in &self.boxes {
                    params.push(
                        QueryParams::new(self.log_mass_min, self.log_mass_max, redshift, sim_box)
                            .cumulative(cumulative),
                    );
                }
            }
        }
        params
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            redshifts: Self::default_redshifts(),
            boxes: Self::default_boxes(),
            cumulative: Self::default_cumulative(),
            log_mass_min: Self::default_log_mass_min(),
            log_mass_max: Self::default_log_mass_max(),
            tracks: TrackPlan::default(),
        }
    }
}

fn box_names(plan: &Value) -> Vec<&str> {
    let mut names: Vec<&str> = plan
        .get("boxes")
        .and_then(Value::as_sequence)
        .map(|boxes| boxes.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if let Some(name) = plan
        .get("tracks")
        .and_then(|tracks| tracks.get("sim_box"))
        .and_then(Value::as_str)
    {
        names.push(name);
    }
    names
}

/// Everything a sweep computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// SHA-256 of the canonical plan encoding.
    pub plan_hash: String,
    /// Mass function curves in [`SweepPlan::curve_params`] order.
    pub curves: Vec<MassFunction>,
    /// Tracks ordered by mode, then mass.
    pub tracks: Vec<RedshiftTrack>,
}

/// Evaluates every curve and track of `plan`.
pub fn run_sweep<S: DataSource + ?Sized>(
    source: &S,
    plan: &SweepPlan,
) -> Result<SweepReport, HmfError> {
    let plan_hash = stable_hash_string(plan)?;
    let curve_params = plan.curve_params();
    info!(curves = curve_params.len(), plan_hash = %plan_hash, "starting sweep");
    let mut curves = Vec::with_capacity(curve_params.len());
    for params in &curve_params {
        curves.push(query(source, params)?);
    }
    let mut tracks = Vec::new();
    for &cumulative in &plan.cumulative {
        for &log_mass in &plan.tracks.masses {
            tracks.push(redshift_track(
                source,
                plan.tracks.sim_box,
                log_mass,
                &plan.redshifts,
                cumulative,
            )?);
        }
    }
    info!(curves = curves.len(), tracks = tracks.len(), "sweep finished");
    Ok(SweepReport {
        plan_hash,
        curves,
        tracks,
    })
}

#![deny(missing_docs)]
#![doc = "Core identifiers, simulation box presets and structured errors shared by the halo mass function crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod mass;
pub mod provenance;
pub mod sim_box;

pub use errors::{ErrorInfo, HmfError};
pub use mass::{MassRange, MAX_ABS_LOG_MASS};
pub use provenance::{QueryProvenance, SchemaVersion};
pub use sim_box::SimBox;

/// Number of mass bins per dex of halo mass.
pub const BINS_PER_DEX: f64 = 10.0;

/// Dimensionless Hubble parameter of the Planck cosmology used by the simulations.
pub const HUBBLE_H: f64 = 0.6777;

/// Identifier for a simulation output timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotId(i64);

impl SnapshotId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> i64 {
        self.0
    }
}

/// Discretised log-mass bin; the raw value is log10(M) x 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MassBin(i64);

impl MassBin {
    /// Creates a new bin from its raw integer representation.
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the bin.
    pub fn as_raw(&self) -> i64 {
        self.0
    }

    /// Returns the lower edge of the bin in log10 solar masses.
    pub fn log_mass(&self) -> f64 {
        self.0 as f64 / BINS_PER_DEX
    }
}

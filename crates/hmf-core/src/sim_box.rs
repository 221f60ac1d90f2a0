//! Presets for the MultiDark simulation boxes backing the histogram tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HmfError};
use crate::{MassBin, HUBBLE_H};

/// Simulation box from which halo histograms are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimBox {
    /// SMDPL, 0.4 Gpc/h on a side.
    Small,
    /// MDPL2, 1.0 Gpc/h on a side.
    Mid,
    /// BigMDPL, 2.5 Gpc/h on a side.
    Big,
}

impl SimBox {
    /// All presets in ascending box size.
    pub const ALL: [SimBox; 3] = [SimBox::Small, SimBox::Mid, SimBox::Big];

    /// Short name used on the command line and in file names.
    pub fn name(&self) -> &'static str {
        match self {
            SimBox::Small => "small",
            SimBox::Mid => "mid",
            SimBox::Big => "big",
        }
    }

    /// Name of the MultiDark run the tables were extracted from.
    pub fn simulation(&self) -> &'static str {
        match self {
            SimBox::Small => "SMDPL",
            SimBox::Mid => "MDPL2",
            SimBox::Big => "BigMDPL",
        }
    }

    /// Comoving side length in Gpc/h.
    pub fn side_length(&self) -> f64 {
        match self {
            SimBox::Small => 0.4,
            SimBox::Mid => 1.0,
            SimBox::Big => 2.5,
        }
    }

    /// Simulation volume in cubic gigaparsecs.
    pub fn volume_gpc3(&self) -> f64 {
        (self.side_length() * HUBBLE_H).powi(3)
    }

    /// Lowest mass bin the box resolves, if it is resolution limited.
    pub fn min_mass_bin(&self) -> Option<MassBin> {
        match self {
            SimBox::Big => Some(MassBin::from_raw(115)),
            SimBox::Small | SimBox::Mid => None,
        }
    }

    /// File holding the (snapshot, mass bin) histogram.
    pub fn histogram_file_name(&self) -> String {
        format!("{}_hist2_z.csv", self.name())
    }

    /// File mapping snapshot indices to redshifts.
    pub fn redshift_file_name(&self) -> String {
        format!("{}_z.csv", self.name())
    }
}

impl fmt::Display for SimBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimBox {
    type Err = HmfError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "small" => Ok(SimBox::Small),
            "mid" => Ok(SimBox::Mid),
            "big" => Ok(SimBox::Big),
            other => Err(HmfError::InvalidArgument(
                ErrorInfo::new("hmf.unknown_box", format!("unknown simulation box '{other}'"))
                    .with_context("box", other)
                    .with_hint("expected one of: small, mid, big"),
            )),
        }
    }
}

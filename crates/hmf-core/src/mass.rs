//! Discretisation of log-mass bounds onto 0.1 dex bins.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HmfError};
use crate::sim_box::SimBox;
use crate::{MassBin, BINS_PER_DEX};

/// Largest accepted magnitude of a log-mass bound, in dex.
pub const MAX_ABS_LOG_MASS: f64 = 1000.0;

/// Half-open range of mass bins `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassRange {
    start: MassBin,
    end: MassBin,
}

impl MassRange {
    /// Creates a range from raw bin bounds. An inverted range is empty.
    pub fn new(start: MassBin, end: MassBin) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Discretises log-mass bounds for the given box.
    ///
    /// The lower bound is floored and the upper bound ceiled after scaling by
    /// ten. Resolution limited boxes clamp the lower bound to their floor bin.
    /// Bounds that are not finite or exceed [`MAX_ABS_LOG_MASS`] in magnitude
    /// are rejected.
    pub fn from_log_mass(
        log_mass_min: f64,
        log_mass_max: f64,
        sim_box: SimBox,
    ) -> Result<Self, HmfError> {
        for (name, value) in [("log_mass_min", log_mass_min), ("log_mass_max", log_mass_max)] {
            if !value.is_finite() {
                return Err(HmfError::InvalidArgument(
                    ErrorInfo::new("hmf.mass_bound", "mass bound must be finite")
                        .with_context(name, value.to_string()),
                ));
            }
            if value.abs() > MAX_ABS_LOG_MASS {
                return Err(HmfError::InvalidArgument(
                    ErrorInfo::new("hmf.mass_bound", "mass bound out of range")
                        .with_context(name, value.to_string())
                        .with_hint(format!("|log mass| must not exceed {MAX_ABS_LOG_MASS}")),
                ));
            }
        }
        let mut start = MassBin::from_raw((log_mass_min * BINS_PER_DEX).floor() as i64);
        let end = MassBin::from_raw((log_mass_max * BINS_PER_DEX).ceil() as i64);
        if let Some(floor) = sim_box.min_mass_bin() {
            start = start.max(floor);
        }
        Ok(Self::new(start, end))
    }

    /// First bin of the range.
    pub fn start(&self) -> MassBin {
        self.start
    }

    /// Bin one past the last bin of the range.
    pub fn end(&self) -> MassBin {
        self.end
    }

    /// Number of bins covered.
    pub fn len(&self) -> usize {
        self.end.as_raw().abs_diff(self.start.as_raw()) as usize
    }

    /// Returns true when the range covers no bins.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterates bins in increasing mass order.
    pub fn bins(&self) -> impl DoubleEndedIterator<Item = MassBin> {
        (self.start.as_raw()..self.end.as_raw()).map(MassBin::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bin_range() {
        let range = MassRange::from_log_mass(10.0, 10.1, SimBox::Small).unwrap();
        assert_eq!(range.start().as_raw(), 100);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn big_box_clamps_lower_bound() {
        let range = MassRange::from_log_mass(10.0, 13.0, SimBox::Big).unwrap();
        assert_eq!(range.start().as_raw(), 115);
        assert_eq!(range.len(), 15);
        let untouched = MassRange::from_log_mass(12.0, 13.0, SimBox::Big).unwrap();
        assert_eq!(untouched.start().as_raw(), 120);
    }

    #[test]
    fn inverted_bounds_are_empty() {
        let range = MassRange::from_log_mass(14.0, 12.0, SimBox::Mid).unwrap();
        assert!(range.is_empty());
        assert_eq!(range.bins().count(), 0);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let err = MassRange::from_log_mass(f64::NAN, 12.0, SimBox::Mid).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn huge_finite_bounds_are_rejected() {
        let err = MassRange::from_log_mass(-1e300, 10.0, SimBox::Small).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.info().context.contains_key("log_mass_min"));
        let err = MassRange::from_log_mass(10.0, 1e300, SimBox::Big).unwrap_err();
        assert!(err.info().context.contains_key("log_mass_max"));
        let widest = MassRange::from_log_mass(-1000.0, 1000.0, SimBox::Small).unwrap();
        assert_eq!(widest.len(), 20_000);
    }
}

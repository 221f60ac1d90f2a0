use std::path::Path;

pub mod query;
pub mod sweep;
pub mod track;
pub mod version;

/// Redshifts the original figures were drawn for.
pub const DEFAULT_REDSHIFTS: [f64; 10] = [0.0, 0.5, 1.0, 2.0, 3.0, 4.5, 6.2, 8.0, 10.0, 15.0];

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

//! Provenance and schema descriptors attached to exported reports.

use serde::{Deserialize, Serialize};

use crate::sim_box::SimBox;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance tying a query result to the tables it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryProvenance {
    /// Schema version of the report payload.
    pub schema_version: SchemaVersion,
    /// Box whose tables were read.
    pub sim_box: SimBox,
    /// SHA-256 of the histogram table contents.
    pub histogram_sha256: String,
    /// SHA-256 of the snapshot redshift table contents.
    pub redshift_sha256: String,
    /// Version of the tool that produced the report.
    pub tool_version: String,
}

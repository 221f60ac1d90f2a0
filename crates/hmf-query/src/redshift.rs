//! Snapshot index to redshift mapping.

use hmf_core::{ErrorInfo, HmfError, SnapshotId};
use tracing::debug;

/// Snapshot redshifts in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedshiftTable {
    entries: Vec<(SnapshotId, f64)>,
}

impl RedshiftTable {
    /// Parses whitespace separated `snapshot redshift` lines.
    ///
    /// Blank lines and `#` comments are skipped.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HmfError> {
        let text = std::str::from_utf8(bytes).map_err(|err| {
            HmfError::Parse(ErrorInfo::new("hmf.redshift_utf8", err.to_string()))
        })?;
        let mut entries = Vec::new();
        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let line_no = (idx + 1).to_string();
            if fields.len() != 2 {
                return Err(HmfError::Parse(
                    ErrorInfo::new(
                        "hmf.redshift_columns",
                        format!("expected 2 columns, found {}", fields.len()),
                    )
                    .with_context("line", line_no),
                ));
            }
            let snapshot = parse_finite(fields[0], &line_no)?;
            if snapshot.fract() != 0.0 {
                return Err(HmfError::Parse(
                    ErrorInfo::new(
                        "hmf.redshift_snapshot",
                        format!("snapshot index {snapshot} is not integral"),
                    )
                    .with_context("line", line_no),
                ));
            }
            let redshift = parse_finite(fields[1], &line_no)?;
            entries.push((SnapshotId::from_raw(snapshot as i64), redshift));
        }
        debug!(snapshots = entries.len(), "parsed redshift table");
        Ok(Self { entries })
    }

    /// Snapshot identifiers in file order.
    pub fn snapshots(&self) -> impl Iterator<Item = SnapshotId> + '_ {
        self.entries.iter().map(|(snapshot, _)| *snapshot)
    }

    /// Snapshot whose redshift has the smallest squared distance to `redshift`.
    ///
    /// Ties resolve to the entry listed first.
    pub fn nearest(&self, redshift: f64) -> Result<(SnapshotId, f64), HmfError> {
        if !redshift.is_finite() {
            return Err(HmfError::InvalidArgument(
                ErrorInfo::new("hmf.redshift", "redshift must be finite")
                    .with_context("redshift", redshift.to_string()),
            ));
        }
        let mut best: Option<(SnapshotId, f64, f64)> = None;
        for (snapshot, z) in &self.entries {
            let distance = (z - redshift).powi(2);
            match best {
                Some((_, _, best_distance)) if best_distance <= distance => {}
                _ => best = Some((*snapshot, *z, distance)),
            }
        }
        best.map(|(snapshot, z, _)| (snapshot, z)).ok_or_else(|| {
            HmfError::NotFound(ErrorInfo::new(
                "hmf.redshift_empty",
                "redshift table lists no snapshots",
            ))
        })
    }
}

fn parse_finite(raw: &str, line: &str) -> Result<f64, HmfError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HmfError::Parse(
            ErrorInfo::new("hmf.redshift_value", format!("'{raw}' is not a finite number"))
                .with_context("line", line),
        )),
    }
}

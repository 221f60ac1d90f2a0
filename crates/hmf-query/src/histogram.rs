//! Sparse (snapshot, mass bin) halo count table.

use std::collections::{HashMap, HashSet};

use csv::{ReaderBuilder, StringRecord, Trim};
use hmf_core::{ErrorInfo, HmfError, MassBin, MassRange, SnapshotId};
use tracing::debug;

const HISTOGRAM_COLUMNS: usize = 5;
const SNAPSHOT_COLUMN: usize = 2;
const MASS_BIN_COLUMN: usize = 3;
const COUNT_COLUMN: usize = 4;

/// Halo counts keyed by snapshot and mass bin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramTable {
    counts: HashMap<(SnapshotId, MassBin), f64>,
}

impl HistogramTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bucket, snapnum, bin_index, log_mass_bin, count` rows.
    ///
    /// The first row is a header. Only the last three columns are used, read
    /// as snapshot index, mass bin and count. Later duplicates overwrite
    /// earlier rows.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, HmfError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes);
        let mut table = Self::new();
        for record in reader.records() {
            let record = record.map_err(|err| {
                HmfError::Parse(
                    ErrorInfo::new("hmf.histogram_csv", "malformed histogram row")
                        .with_hint(err.to_string()),
                )
            })?;
            let line = record
                .position()
                .map(|pos| pos.line().to_string())
                .unwrap_or_else(|| "?".into());
            if record.len() != HISTOGRAM_COLUMNS {
                return Err(HmfError::Parse(
                    ErrorInfo::new(
                        "hmf.histogram_columns",
                        format!(
                            "expected {HISTOGRAM_COLUMNS} columns, found {}",
                            record.len()
                        ),
                    )
                    .with_context("line", line),
                ));
            }
            let snapshot = integral_field(&record, SNAPSHOT_COLUMN, &line)?;
            let bin = integral_field(&record, MASS_BIN_COLUMN, &line)?;
            let count = numeric_field(&record, COUNT_COLUMN, &line)?;
            table.insert(SnapshotId::from_raw(snapshot), MassBin::from_raw(bin), count);
        }
        debug!(entries = table.len(), "parsed histogram table");
        Ok(table)
    }

    /// Sets the count of a (snapshot, bin) pair.
    pub fn insert(&mut self, snapshot: SnapshotId, bin: MassBin, count: f64) {
        self.counts.insert((snapshot, bin), count);
    }

    /// Count recorded for a (snapshot, bin) pair, if any.
    pub fn get(&self, snapshot: SnapshotId, bin: MassBin) -> Option<f64> {
        self.counts.get(&(snapshot, bin)).copied()
    }

    /// Number of (snapshot, bin) entries.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Converts counts into "this bin and everything above" counts.
    ///
    /// For every listed snapshot the walk starts at the highest recorded bin
    /// (or the top of `range`, whichever is higher) and runs down to
    /// `range.start()`. Missing entries contribute zero, so every bin of
    /// `range` is defined afterwards. Snapshots listed more than once are
    /// accumulated once.
    pub fn into_cumulative<I>(mut self, snapshots: I, range: MassRange) -> Self
    where
        I: IntoIterator<Item = SnapshotId>,
    {
        if range.is_empty() {
            return self;
        }
        let top_of_range = MassBin::from_raw(range.end().as_raw() - 1);
        let mut highest: HashMap<SnapshotId, MassBin> = HashMap::new();
        for (snapshot, bin) in self.counts.keys() {
            let entry = highest.entry(*snapshot).or_insert(*bin);
            *entry = (*entry).max(*bin);
        }
        let mut seen = HashSet::new();
        for snapshot in snapshots {
            if !seen.insert(snapshot) {
                continue;
            }
            let top = highest
                .get(&snapshot)
                .map_or(top_of_range, |bin| (*bin).max(top_of_range));
            let mut running = 0.0;
            for raw in (range.start().as_raw()..=top.as_raw()).rev() {
                let bin = MassBin::from_raw(raw);
                running += self.get(snapshot, bin).unwrap_or(0.0);
                self.insert(snapshot, bin, running);
            }
        }
        self
    }
}

fn numeric_field(record: &StringRecord, column: usize, line: &str) -> Result<f64, HmfError> {
    let raw = record.get(column).unwrap_or_default();
    let value: f64 = raw.parse().map_err(|_| {
        HmfError::Parse(
            ErrorInfo::new("hmf.histogram_value", format!("'{raw}' is not a number"))
                .with_context("line", line)
                .with_context("column", column.to_string()),
        )
    })?;
    if !value.is_finite() {
        return Err(HmfError::Parse(
            ErrorInfo::new("hmf.histogram_value", format!("'{raw}' is not finite"))
                .with_context("line", line)
                .with_context("column", column.to_string()),
        ));
    }
    Ok(value)
}

fn integral_field(record: &StringRecord, column: usize, line: &str) -> Result<i64, HmfError> {
    let value = numeric_field(record, column, line)?;
    if value.fract() != 0.0 {
        return Err(HmfError::Parse(
            ErrorInfo::new(
                "hmf.histogram_key",
                format!("expected an integral key, found {value}"),
            )
            .with_context("line", line)
            .with_context("column", column.to_string()),
        ));
    }
    Ok(value as i64)
}

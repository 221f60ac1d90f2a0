//! Access to the per-box input tables.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use hmf_core::{ErrorInfo, HmfError, SimBox};
use tracing::debug;

/// The two tables every box provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    /// `<box>_hist2_z.csv`, halo counts per snapshot and mass bin.
    Histogram,
    /// `<box>_z.csv`, snapshot index to redshift mapping.
    Redshift,
}

impl TableKind {
    /// File name of this table for the given box.
    pub fn file_name(&self, sim_box: SimBox) -> String {
        match self {
            TableKind::Histogram => sim_box.histogram_file_name(),
            TableKind::Redshift => sim_box.redshift_file_name(),
        }
    }
}

/// Provider of raw table contents.
pub trait DataSource {
    /// Reads the full contents of a table.
    fn read_table(&self, sim_box: SimBox, kind: TableKind) -> Result<Vec<u8>, HmfError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn read_table(&self, sim_box: SimBox, kind: TableKind) -> Result<Vec<u8>, HmfError> {
        (**self).read_table(sim_box, kind)
    }
}

/// Reads tables from a directory using the standard file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path of a table.
    pub fn table_path(&self, sim_box: SimBox, kind: TableKind) -> PathBuf {
        self.root.join(kind.file_name(sim_box))
    }
}

impl DataSource for DirectorySource {
    fn read_table(&self, sim_box: SimBox, kind: TableKind) -> Result<Vec<u8>, HmfError> {
        let path = self.table_path(sim_box, kind);
        let bytes = fs::read(&path).map_err(|err| {
            let info = ErrorInfo::new("hmf.table_read", format!("failed to read table: {err}"))
                .with_context("path", path.display().to_string())
                .with_context("box", sim_box.name());
            if err.kind() == ErrorKind::NotFound {
                HmfError::NotFound(info.with_hint(format!(
                    "expected {} under {}",
                    kind.file_name(sim_box),
                    self.root.display()
                )))
            } else {
                HmfError::Io(info)
            }
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read table");
        Ok(bytes)
    }
}

/// In-memory tables, used for fixtures and benchmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    tables: BTreeMap<(SimBox, TableKind), Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the contents of a table, replacing any previous contents.
    pub fn insert(&mut self, sim_box: SimBox, kind: TableKind, contents: impl Into<Vec<u8>>) {
        self.tables.insert((sim_box, kind), contents.into());
    }

    /// Builder variant of [`MemorySource::insert`].
    pub fn with_table(
        mut self,
        sim_box: SimBox,
        kind: TableKind,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(sim_box, kind, contents);
        self
    }
}

impl DataSource for MemorySource {
    fn read_table(&self, sim_box: SimBox, kind: TableKind) -> Result<Vec<u8>, HmfError> {
        self.tables.get(&(sim_box, kind)).cloned().ok_or_else(|| {
            HmfError::NotFound(
                ErrorInfo::new("hmf.table_missing", "table not present in memory source")
                    .with_context("table", kind.file_name(sim_box)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_table_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        let err = source
            .read_table(SimBox::Small, TableKind::Histogram)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.info().context["path"].ends_with("small_hist2_z.csv"));
    }

    #[test]
    fn directory_reads_named_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mid_z.csv"), "1 0.5\n").unwrap();
        let source = DirectorySource::new(dir.path());
        let bytes = source.read_table(SimBox::Mid, TableKind::Redshift).unwrap();
        assert_eq!(bytes, b"1 0.5\n");
    }

    #[test]
    fn memory_source_keys_by_box_and_kind() {
        let source = MemorySource::new().with_table(SimBox::Big, TableKind::Redshift, "3 1.0");
        assert!(source.read_table(SimBox::Big, TableKind::Redshift).is_ok());
        assert!(source
            .read_table(SimBox::Small, TableKind::Redshift)
            .unwrap_err()
            .is_not_found());
    }
}

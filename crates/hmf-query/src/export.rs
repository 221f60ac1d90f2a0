//! CSV export of curves and tracks.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use csv::Writer;
use hmf_core::{ErrorInfo, HmfError};

use crate::query::MassFunction;
use crate::track::RedshiftTrack;

fn wrap_csv(code: &str, err: csv::Error) -> HmfError {
    HmfError::Io(ErrorInfo::new(code, "CSV export failure").with_hint(err.to_string()))
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        value.to_string()
    }
}

/// Writes `log_mass,density` rows; bins without data are written as `nan`.
pub fn write_mass_function_csv<W: Write>(out: W, curve: &MassFunction) -> Result<(), HmfError> {
    let mut writer = Writer::from_writer(out);
    writer
        .write_record(["log_mass", "density"])
        .map_err(|err| wrap_csv("hmf.export_header", err))?;
    for (log_mass, density) in curve.points() {
        writer
            .write_record([format_value(log_mass), format_value(density)])
            .map_err(|err| wrap_csv("hmf.export_row", err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_csv("hmf.export_flush", err.into()))
}

/// Writes `redshift,density` rows; missing densities are written as `nan`.
pub fn write_track_csv<W: Write>(out: W, track: &RedshiftTrack) -> Result<(), HmfError> {
    let mut writer = Writer::from_writer(out);
    writer
        .write_record(["redshift", "density"])
        .map_err(|err| wrap_csv("hmf.export_header", err))?;
    for point in &track.points {
        writer
            .write_record([
                format_value(point.redshift),
                format_value(point.density.unwrap_or(f64::NAN)),
            ])
            .map_err(|err| wrap_csv("hmf.export_row", err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_csv("hmf.export_flush", err.into()))
}

/// Creates `path` (and its parent directories) for writing.
pub fn create_output(path: &Path) -> Result<File, HmfError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            HmfError::Io(
                ErrorInfo::new("hmf.export_dir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    File::create(path).map_err(|err| {
        HmfError::Io(
            ErrorInfo::new("hmf.export_create", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{query, QueryParams};
    use crate::source::{MemorySource, TableKind};
    use hmf_core::SimBox;

    #[test]
    fn nan_bins_are_written_as_nan() {
        let source = MemorySource::new()
            .with_table(SimBox::Mid, TableKind::Histogram, "b,s,i,M,N\n0,0,1,121,5\n")
            .with_table(SimBox::Mid, TableKind::Redshift, "1 0.0\n");
        let curve = query(&source, &QueryParams::new(12.0, 12.2, 0.0, SimBox::Mid)).unwrap();
        let mut out = Vec::new();
        write_mass_function_csv(&mut out, &curve).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "log_mass,density");
        assert_eq!(lines[1], "12,nan");
        assert!(lines[2].starts_with("12.1,"));
    }

    #[test]
    fn create_output_makes_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        create_output(&path).unwrap();
        assert!(path.exists());
    }
}

//! Halo mass function lookups over precomputed MultiDark histogram tables.
//!
//! The central entry point is [`query`]: it resolves the simulation box,
//! discretises the requested mass range onto 0.1 dex bins, picks the snapshot
//! nearest the requested redshift and normalises the histogram counts by the
//! simulation volume and bin width.

pub mod export;
pub mod hash;
pub mod histogram;
pub mod query;
pub mod redshift;
pub mod serde;
pub mod source;
pub mod sweep;
pub mod track;

pub use export::{create_output, write_mass_function_csv, write_track_csv};
pub use hash::{sha256_hex, stable_hash_string};
pub use histogram::HistogramTable;
pub use query::{query, query_dir, MassFunction, QueryParams, BIN_WIDTH, CUMULATIVE_BIN_WIDTH};
pub use redshift::RedshiftTable;
pub use source::{DataSource, DirectorySource, MemorySource, TableKind};
pub use sweep::{run_sweep, SweepPlan, SweepReport, TrackPlan};
pub use track::{redshift_track, RedshiftTrack, TrackPoint};

pub use crate::serde::{from_json_slice, from_yaml_slice, to_canonical_json_bytes};

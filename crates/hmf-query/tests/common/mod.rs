#![allow(dead_code)]

use std::fs;
use std::path::Path;

use hmf_core::SimBox;
use hmf_query::{MemorySource, TableKind};

/// Snapshot 125 sits at z=0, 100 at z=0.5, 60 at z=2.
pub const REDSHIFTS: &str = "# snapnum zred\n60 2.0\n125 0.0\n100 0.5\n";

/// Counts per (snapshot, bin) with gaps at bins 103 and 104 of snapshot 125.
pub const HISTOGRAM: &str = "\
bucket,snapnum,i,M,N
1250100,125,125,100,12000
1250101,125,125,101,9000
1250102,125,125,102,6100
1250105,125,125,105,700
1250115,125,125,115,40
1250120,125,125,120,3
1000100,100,100,100,11000
1000101,100,100,101,8000
600100,60,60,100,4000
600115,60,60,115,2
";

pub fn memory_source() -> MemorySource {
    let mut source = MemorySource::new();
    for sim_box in SimBox::ALL {
        source.insert(sim_box, TableKind::Histogram, HISTOGRAM);
        source.insert(sim_box, TableKind::Redshift, REDSHIFTS);
    }
    source
}

pub fn write_tables(dir: &Path, sim_box: SimBox) {
    fs::write(dir.join(sim_box.histogram_file_name()), HISTOGRAM).expect("histogram fixture");
    fs::write(dir.join(sim_box.redshift_file_name()), REDSHIFTS).expect("redshift fixture");
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

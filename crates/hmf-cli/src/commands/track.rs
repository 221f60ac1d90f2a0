use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use hmf_core::SimBox;
use hmf_query::{
    create_output, redshift_track, to_canonical_json_bytes, write_track_csv, DirectorySource,
};

use super::{is_json, DEFAULT_REDSHIFTS};

#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Simulation box: small, mid or big.
    #[arg(long = "box", default_value = "small")]
    pub sim_box: SimBox,
    /// Lower edge of the tracked bin in log10 Msun/h.
    #[arg(long)]
    pub mass: f64,
    /// Comma separated redshifts.
    #[arg(long = "z", value_delimiter = ',', default_values_t = DEFAULT_REDSHIFTS)]
    pub redshifts: Vec<f64>,
    /// Track cumulative densities N(>M).
    #[arg(long)]
    pub cumulative: bool,
    /// Directory holding the box tables.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,
    /// Output file; `.json` writes the full track, anything else CSV. Stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &TrackArgs) -> Result<(), Box<dyn Error>> {
    let source = DirectorySource::new(&args.data_dir);
    let track = redshift_track(
        &source,
        args.sim_box,
        args.mass,
        &args.redshifts,
        args.cumulative,
    )?;
    match &args.out {
        Some(path) if is_json(path) => {
            let bytes = to_canonical_json_bytes(&track)?;
            create_output(path)?.write_all(&bytes)?;
        }
        Some(path) => write_track_csv(create_output(path)?, &track)?,
        None => write_track_csv(io::stdout().lock(), &track)?,
    }
    Ok(())
}

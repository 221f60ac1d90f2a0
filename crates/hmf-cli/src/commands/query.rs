use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use hmf_core::SimBox;
use hmf_query::{
    create_output, query_dir, to_canonical_json_bytes, write_mass_function_csv, QueryParams,
};
use tracing::info;

use super::is_json;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Simulation box: small, mid or big.
    #[arg(long = "box", default_value = "small")]
    pub sim_box: SimBox,
    /// Lower log10 halo mass bound.
    #[arg(long, default_value_t = 10.0)]
    pub min: f64,
    /// Upper log10 halo mass bound.
    #[arg(long, default_value_t = 16.0)]
    pub max: f64,
    /// Requested redshift.
    #[arg(long = "z", default_value_t = 0.0)]
    pub redshift: f64,
    /// Emit cumulative densities N(>M).
    #[arg(long)]
    pub cumulative: bool,
    /// Directory holding `<box>_hist2_z.csv` and `<box>_z.csv`.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,
    /// Output file; `.json` writes the full report, anything else CSV. Stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &QueryArgs) -> Result<(), Box<dyn Error>> {
    let params = QueryParams::new(args.min, args.max, args.redshift, args.sim_box)
        .cumulative(args.cumulative);
    let curve = query_dir(&args.data_dir, &params)?;
    info!(
        sim_box = %args.sim_box,
        snapshot = curve.snapshot.as_raw(),
        snapshot_redshift = curve.snapshot_redshift,
        bins = curve.len(),
        "computed mass function"
    );
    match &args.out {
        Some(path) if is_json(path) => {
            let bytes = to_canonical_json_bytes(&curve)?;
            create_output(path)?.write_all(&bytes)?;
        }
        Some(path) => write_mass_function_csv(create_output(path)?, &curve)?,
        None => write_mass_function_csv(io::stdout().lock(), &curve)?,
    }
    Ok(())
}

use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use hmf_query::{
    create_output, run_sweep, to_canonical_json_bytes, write_mass_function_csv,
    write_track_csv, DirectorySource, MassFunction, RedshiftTrack, SweepPlan,
};
use tracing::info;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML sweep plan; the default plan covers every box at the standard redshifts.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Directory holding the box tables.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,
    /// Output directory for CSV tables and `sweep_report.json`.
    #[arg(long)]
    pub out: PathBuf,
}

fn mode(cumulative: bool) -> &'static str {
    if cumulative {
        "cumulative"
    } else {
        "differential"
    }
}

fn curve_file_name(curve: &MassFunction) -> String {
    format!(
        "hmf_{}_{}_z{}.csv",
        mode(curve.params.cumulative),
        curve.params.sim_box,
        curve.params.redshift
    )
}

fn track_file_name(track: &RedshiftTrack) -> String {
    format!(
        "hmf_{}_{}_M{}.csv",
        mode(track.cumulative),
        track.sim_box,
        track.log_mass
    )
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let plan = match &args.plan {
        Some(path) => SweepPlan::from_yaml(&fs::read(path)?)?,
        None => SweepPlan::default(),
    };
    fs::create_dir_all(&args.out)?;
    let source = DirectorySource::new(&args.data_dir);
    let report = run_sweep(&source, &plan)?;

    for curve in &report.curves {
        write_mass_function_csv(create_output(&args.out.join(curve_file_name(curve)))?, curve)?;
    }
    for track in &report.tracks {
        write_track_csv(create_output(&args.out.join(track_file_name(track)))?, track)?;
    }
    let bytes = to_canonical_json_bytes(&report)?;
    create_output(&args.out.join("sweep_report.json"))?.write_all(&bytes)?;
    info!(
        out = %args.out.display(),
        curves = report.curves.len(),
        tracks = report.tracks.len(),
        "wrote sweep outputs"
    );
    Ok(())
}

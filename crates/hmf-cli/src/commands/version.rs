use std::error::Error;
use std::process::Command;

use clap::Args;
use hmf_core::SimBox;
use hmf_query::to_canonical_json_bytes;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit the toolchain and the simulation boxes this build knows about.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct BoxInfo {
    name: &'static str,
    simulation: &'static str,
    side_length_gpc_h: f64,
    volume_gpc3: f64,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    rustc: String,
    boxes: Vec<BoxInfo>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        rustc: rustc_version(),
        boxes: SimBox::ALL
            .iter()
            .map(|sim_box| BoxInfo {
                name: sim_box.name(),
                simulation: sim_box.simulation(),
                side_length_gpc_h: sim_box.side_length(),
                volume_gpc3: sim_box.volume_gpc3(),
            })
            .collect(),
    };
    let json = to_canonical_json_bytes(&info)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}

fn rustc_version() -> String {
    Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "rustc unavailable".into())
}

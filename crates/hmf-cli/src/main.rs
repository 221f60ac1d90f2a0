use std::error::Error;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    query::{self, QueryArgs},
    sweep::{self, SweepArgs},
    track::{self, TrackArgs},
    version::{self, VersionArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "hmf", about = "Halo mass functions from MultiDark snapshot histograms")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one mass function curve.
    Query(QueryArgs),
    /// Follow the density of one mass bin across redshifts.
    Track(TrackArgs),
    /// Evaluate every curve and track of a YAML sweep plan.
    Sweep(SweepArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    match cli.command {
        Command::Query(args) => query::run(&args),
        Command::Track(args) => track::run(&args),
        Command::Sweep(args) => sweep::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

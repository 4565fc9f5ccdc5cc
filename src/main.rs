pub mod commands;
pub mod countdown;
pub mod cues;
pub mod playback;
pub mod schedule;

use clap::{Parser, Subcommand};
use commands::{fetch::FetchArgs, start::StartArgs};
use std::process::ExitCode;

#[derive(Subcommand)]
enum Commands {
    /// Run an interval training session.
    Start(StartArgs),
    /// Download the audio cue clips.
    Fetch(FetchArgs),
}

#[derive(Parser)]
#[command(version, about = "A timer for interval training.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = <Cli as Parser>::parse();

    match &cli.command {
        Commands::Start(args) => commands::start::run_start_command(args),
        Commands::Fetch(args) => commands::fetch::run_fetch_command(args),
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::cues::{CuePurpose, CueStore, FetchOutcome};

#[derive(Parser)]
pub struct FetchArgs {
    /// Download the clips again even when they are already present.
    #[arg(long)]
    pub overwrite: bool,

    /// Directory to store the cue clips in.
    #[arg(long)]
    pub audio_dir: Option<PathBuf>,
}

pub fn run_fetch_command(args: &FetchArgs) -> anyhow::Result<ExitCode> {
    let store = CueStore::new(args.audio_dir.clone());
    println!("Storing cue clips in {}.", store.audio_dir().display());

    for purpose in CuePurpose::all() {
        match store.ensure(purpose, args.overwrite)? {
            FetchOutcome::Downloaded => println!(
                "  {}: downloaded {}",
                purpose.name(),
                store.local_path(purpose).display()
            ),
            FetchOutcome::AlreadyPresent => println!("  {}: already present", purpose.name()),
        }
    }

    Ok(ExitCode::SUCCESS)
}

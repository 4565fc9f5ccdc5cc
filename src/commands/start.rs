use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::countdown::{run_session, WallClock};
use crate::cues::CueStore;
use crate::playback::{CueBank, Cues, Muted};
use crate::schedule;

const DEFAULT_REPS: u32 = 6;

#[derive(Parser)]
pub struct StartArgs {
    /// Space separated list of durations for the exercises, in seconds.
    #[arg(required = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub durations: Vec<u32>,

    /// Seconds before the first and in between exercises.
    #[arg(short, long, default_value_t = 10)]
    pub wait: u32,

    /// Space separated list of names for the exercises.
    #[arg(short, long, num_args = 0..)]
    pub names: Option<Vec<String>>,

    /// Single number of repetitions to be used for all exercises or space
    /// separated list of repetitions for the according exercises.
    #[arg(short, long, num_args = 0.., value_parser = clap::value_parser!(u32).range(1..))]
    pub reps: Option<Vec<u32>>,

    /// Single delay to be used for breaks in between repetitions or space
    /// separated list of delays for the according exercises, in seconds.
    #[arg(short, long, num_args = 0..)]
    pub delays: Option<Vec<u32>>,

    /// Run without audio cues.
    #[arg(long)]
    pub mute: bool,

    /// Directory holding the cue clips.
    #[arg(long)]
    pub audio_dir: Option<PathBuf>,
}

pub fn run_start_command(args: &StartArgs) -> anyhow::Result<ExitCode> {
    let schedule = schedule::build(
        &args.durations,
        args.names.clone(),
        args.delays.clone(),
        args.reps.clone(),
        DEFAULT_REPS,
    )?;

    println!(
        "The exercise will take approximately {} seconds.",
        schedule::estimated_seconds(&schedule, args.wait)
    );

    // A session without sound is still a session, so a failing audio
    // setup only costs us the cues.
    let cues: Box<dyn Cues> = if args.mute {
        Box::new(Muted)
    } else {
        let store = CueStore::new(args.audio_dir.clone());
        match prepare_cue_bank(&store) {
            Ok(bank) => Box::new(bank),
            Err(error) => {
                eprintln!(
                    "Audio cues unavailable ({:#}); continuing without sound.",
                    error
                );
                Box::new(Muted)
            }
        }
    };

    run_session(
        &schedule,
        args.wait,
        &mut stdout(),
        &mut WallClock,
        cues.as_ref(),
    )?;

    Ok(ExitCode::SUCCESS)
}

fn prepare_cue_bank(store: &CueStore) -> anyhow::Result<CueBank> {
    store.ensure_all(false)?;
    CueBank::load(store)
}

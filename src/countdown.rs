use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crate::cues::CuePurpose;
use crate::playback::Cues;
use crate::schedule::Exercise;

// Remaining seconds at or below which every tick also beeps.
const BEEP_THRESHOLD: u32 = 3;

/// One-second pacing of the countdown, swappable so tests run instantly.
pub trait Clock {
    fn tick(&mut self);
}

pub struct WallClock;

impl Clock for WallClock {
    fn tick(&mut self) {
        thread::sleep(Duration::from_secs(1));
    }
}

/// Print the remaining seconds once per tick, indented, beeping over the
/// last few.
pub fn verbose_countdown<W: Write, C: Clock, B: Cues + ?Sized>(
    seconds: u32,
    out: &mut W,
    clock: &mut C,
    cues: &B,
) -> anyhow::Result<()> {
    for remaining in (1..=seconds).rev() {
        writeln!(out, "    {}", remaining)?;
        if remaining <= BEEP_THRESHOLD {
            cues.cue(CuePurpose::Beep);
        }
        clock.tick();
    }
    Ok(())
}

/// Walk the whole schedule, narrating every phase and sounding the cues.
/// Returns the elapsed whole seconds also printed in the closing line.
pub fn run_session<W: Write, C: Clock, B: Cues + ?Sized>(
    schedule: &[Exercise],
    wait: u32,
    out: &mut W,
    clock: &mut C,
    cues: &B,
) -> anyhow::Result<u64> {
    let begin = Instant::now();

    for exercise in schedule {
        writeln!(out, "{} starts in...", exercise.name)?;
        verbose_countdown(wait, out, clock, cues)?;

        for repetition in 1..=exercise.reps {
            cues.cue(CuePurpose::Ignition);
            let running = cues.play(CuePurpose::Running);
            writeln!(out, "{}. {} for...", repetition, exercise.name)?;
            verbose_countdown(exercise.duration, out, clock, cues)?;
            running.stop();
            cues.cue(CuePurpose::End);

            if repetition < exercise.reps {
                writeln!(out, "Relax for...")?;
                verbose_countdown(exercise.delay, out, clock, cues)?;
            }
        }
    }

    let finish = cues.play(CuePurpose::Finish);
    let elapsed = begin.elapsed().as_secs();
    writeln!(out, "Set completed in {} seconds.", elapsed)?;

    // Let the closing applause ring out before the process ends.
    while finish.is_playing() {
        thread::sleep(Duration::from_millis(50));
    }

    Ok(elapsed)
}

//! Reconciles the raw per-exercise argument lists into a runnable schedule.

use thiserror::Error;

/// One fully-resolved work interval. All fields are concrete by the time a
/// schedule leaves [`build`]; `delay` applies after every repetition except
/// the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub duration: u32,
    pub delay: u32,
    pub reps: u32,
}

/// The ordered exercises of one session, positionally matching the supplied
/// durations.
pub type Schedule = Vec<Exercise>;

/// Raised when an optional per-exercise list cannot be reconciled with the
/// number of exercises. Always fatal, and always names both counts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "number of names is expected to match the number of exercises \
         but we have {exercises} exercises and {names} names"
    )]
    NameCount { exercises: usize, names: usize },

    #[error(
        "number of {list} is expected to match the number of exercises or to be \
         just one to be used for all exercises \
         but we have {exercises} exercises and {supplied} {list}"
    )]
    PerExerciseCount {
        list: &'static str,
        exercises: usize,
        supplied: usize,
    },
}

/// Whether a single supplied value may stand in for every exercise.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Broadcast {
    Allowed,
    Denied,
}

/// Align an optional per-exercise list with the exercise count: a missing
/// list is filled from `default_for` per index, a full-length list maps
/// positionally, and a single value is repeated when broadcasting is
/// allowed. Every other length is a configuration error.
fn resolve_per_exercise<T: Clone>(
    list: &'static str,
    supplied: Option<Vec<T>>,
    count: usize,
    broadcast: Broadcast,
    default_for: impl Fn(usize) -> T,
) -> Result<Vec<T>, ConfigurationError> {
    let Some(values) = supplied else {
        return Ok((0..count).map(default_for).collect());
    };

    if values.len() == count {
        return Ok(values);
    }
    if broadcast == Broadcast::Allowed && values.len() == 1 {
        return Ok(vec![values[0].clone(); count]);
    }

    Err(match broadcast {
        Broadcast::Allowed => ConfigurationError::PerExerciseCount {
            list,
            exercises: count,
            supplied: values.len(),
        },
        Broadcast::Denied => ConfigurationError::NameCount {
            exercises: count,
            names: values.len(),
        },
    })
}

/// Build the schedule for one session.
///
/// `durations` drives the exercise count. Missing names are generated as
/// `Exercise {index}`, a missing delay falls back to the exercise's own
/// duration, and missing repetitions fall back to `default_reps`. Names
/// must match the exercise count exactly; delays and repetitions may also
/// be given as one value for all exercises.
pub fn build(
    durations: &[u32],
    names: Option<Vec<String>>,
    delays: Option<Vec<u32>>,
    reps: Option<Vec<u32>>,
    default_reps: u32,
) -> Result<Schedule, ConfigurationError> {
    let count = durations.len();

    let names = resolve_per_exercise("names", names, count, Broadcast::Denied, |index| {
        format!("Exercise {index}")
    })?;
    let delays = resolve_per_exercise("delays", delays, count, Broadcast::Allowed, |index| {
        durations[index]
    })?;
    let reps = resolve_per_exercise("repetitions", reps, count, Broadcast::Allowed, |_| {
        default_reps
    })?;

    Ok(durations
        .iter()
        .zip(names)
        .zip(delays)
        .zip(reps)
        .map(|(((&duration, name), delay), reps)| Exercise {
            name,
            duration,
            delay,
            reps,
        })
        .collect())
}

/// Whole-session length estimate in seconds: each exercise pays the
/// pre-exercise wait once, then runs `reps` work intervals with a rest
/// after every repetition but the last.
pub fn estimated_seconds(schedule: &[Exercise], wait: u32) -> u64 {
    schedule
        .iter()
        .map(|exercise| {
            let repetition = u64::from(exercise.duration) + u64::from(exercise.delay);
            u64::from(wait) + u64::from(exercise.reps) * repetition - u64::from(exercise.delay)
        })
        .sum()
}

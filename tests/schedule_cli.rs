use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_interval-timer"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn a_name_count_mismatch_fails_before_anything_starts() {
    let output = run(&[
        "start", "10", "10", "-n", "Push", "Pull", "Squat", "-w", "0", "--mute",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("2 exercises"), "stderr was: {stderr}");
    assert!(stderr.contains("3 names"), "stderr was: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn a_muted_one_second_session_runs_to_completion() {
    let output = run(&["start", "1", "-w", "0", "-r", "1", "-d", "0", "--mute"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("The exercise will take approximately 1 seconds."));
    assert!(stdout.contains("Exercise 0 starts in..."));
    assert!(stdout.contains("1. Exercise 0 for..."));
    assert!(stdout.contains("Set completed in"));
}

#[test]
fn zero_repetitions_are_rejected_at_the_command_line() {
    let output = run(&["start", "5", "-r", "0", "--mute"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn zero_durations_are_rejected_at_the_command_line() {
    let output = run(&["start", "0", "--mute"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn durations_are_required() {
    let output = run(&["start", "--mute"]);

    assert_eq!(output.status.code(), Some(2));
}

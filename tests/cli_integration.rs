//! Binary-level CLI behavior.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_no_arguments_prints_help() {
    let mut cmd = cargo_bin_cmd!("reeler");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("reeler");
    cmd.arg("/nonexistent/stream.mp4").arg("-q");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input file does not exist"));
}

#[test]
fn test_brightness_out_of_range_is_rejected() {
    let mut cmd = cargo_bin_cmd!("reeler");
    cmd.arg("stream.mp4").arg("--brightness").arg("300");

    cmd.assert().failure();
}

#[test]
fn test_invalid_threshold_is_rejected() {
    let mut cmd = cargo_bin_cmd!("reeler");
    cmd.arg("stream.mp4").arg("-t").arg("loud");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a valid number"));
}

#[test]
fn test_reference_requires_existing_input() {
    let mut cmd = cargo_bin_cmd!("reeler");
    cmd.arg("reference").arg("/nonexistent/stream.mp4");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input file does not exist"));
}

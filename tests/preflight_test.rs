//! Pre-flight checks around the destination directory.

use reeler::error::Error;
use reeler::pipeline::{preflight, prepare_output_dir};
use std::path::Path;

#[test]
fn test_missing_input_fails_before_anything_else() {
    let dir = tempfile::tempdir().unwrap();
    let result = preflight(Path::new("/nonexistent/stream.mp4"), dir.path());
    assert!(matches!(result, Err(Error::InputNotFound { .. })));
}

#[test]
fn test_output_dir_is_created_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("a").join("b");

    prepare_output_dir(&target).unwrap();
    assert!(target.is_dir());

    // A second run against the still-empty directory is fine
    prepare_output_dir(&target).unwrap();
}

#[test]
fn test_leftover_clips_fail_the_whole_run_up_front() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("12-(0 00 12).mp4"), b"old clip").unwrap();

    let result = prepare_output_dir(dir.path());
    match result {
        Err(Error::OutputNotEmpty { path }) => assert_eq!(path, dir.path()),
        other => panic!("expected OutputNotEmpty, got {other:?}"),
    }
}

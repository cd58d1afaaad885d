//! CLI error paths: invalid parameters fail with a message instead of panicking.

use crate::helpers::run_fgpile;

fn assert_fails_with(args: &[&str], message: &str) {
    let output = run_fgpile(args);
    assert!(!output.status.success(), "expected fgpile {args:?} to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(message), "stderr did not contain {message:?}: {stderr}");
}

#[test]
fn test_inverted_window_range() {
    assert_fails_with(
        &["simulate", "dedup", "--initial-window", "100", "--max-window", "10"],
        "initial-window",
    );
}

#[test]
fn test_window_exhausted() {
    assert_fails_with(
        &[
            "simulate",
            "dedup",
            "--seed",
            "1",
            "--num-molecules",
            "50",
            "--ref-length",
            "100",
            "--read-length",
            "100",
            "--initial-window",
            "1",
            "--max-window",
            "2",
        ],
        "raise --max-window",
    );
}

#[test]
fn test_read_longer_than_reference() {
    assert_fails_with(
        &["simulate", "pileup", "--read-length", "500", "--ref-length", "100"],
        "read-length",
    );
}

#[test]
fn test_invalid_error_rate() {
    assert_fails_with(&["simulate", "pileup", "--error-rate", "2.0"], "error-rate");
}

#[test]
fn test_unknown_family_size_distribution() {
    assert_fails_with(&["simulate", "dedup", "--family-size-dist", "uniform"], "Unknown family size");
}

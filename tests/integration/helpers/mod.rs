//! Shared helpers for CLI tests.

use std::path::Path;
use std::process::{Command, Output};

use fgoxide::io::DelimFile;
use serde::de::DeserializeOwned;

/// Small, seeded simulation arguments so tests run quickly and reproducibly.
pub const SMALL_SIMULATION: &[&str] = &[
    "--seed",
    "42",
    "--num-molecules",
    "300",
    "--read-length",
    "40",
    "--ref-length",
    "3000",
    "--num-contigs",
    "2",
    "--umi-space",
    "4",
];

/// Runs `fgpile` with `args`, returning its output.
pub fn run_fgpile(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fgpile")).args(args).output().expect("Failed to run fgpile")
}

/// Runs `fgpile`, panicking with its stderr if it fails.
pub fn run_fgpile_ok(args: &[&str]) {
    let output = run_fgpile(args);
    assert!(
        output.status.success(),
        "fgpile {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Reads every row of a TSV written by fgpile.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    DelimFile::default().read_tsv(&path).expect("Failed to read TSV")
}

/// Converts a path to the `&str` form used on the command line.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 temp path")
}

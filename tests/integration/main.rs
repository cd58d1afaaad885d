//! End-to-end CLI tests for the fgpile binary.
//!
//! Each test runs the built `fgpile` executable and checks its TSV outputs.

mod helpers;
mod test_error_paths;
mod test_simulate_dedup;
mod test_simulate_pileup;

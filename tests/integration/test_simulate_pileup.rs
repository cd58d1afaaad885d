//! End-to-end CLI tests for `fgpile simulate pileup`.

use serde::Deserialize;
use tempfile::TempDir;

use crate::helpers::{SMALL_SIMULATION, arg, read_rows, run_fgpile_ok};

#[derive(Debug, Deserialize)]
struct ColumnRow {
    contig: u32,
    position: u32,
    depth: u64,
    a: u64,
    c: u64,
    g: u64,
    t: u64,
    n: u64,
    consensus: char,
}

#[derive(Debug, Deserialize)]
struct PileupRow {
    total_records: u64,
    columns: u64,
    total_depth: u64,
    max_depth: u64,
}

#[test]
fn test_columns_account_for_every_base() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("pileup.tsv");
    let metrics = dir.path().join("metrics.tsv");
    let mut args = vec!["simulate", "pileup", "--output", arg(&output), "--metrics", arg(&metrics)];
    args.extend_from_slice(SMALL_SIMULATION);
    run_fgpile_ok(&args);

    let columns: Vec<ColumnRow> = read_rows(&output);
    let metrics: Vec<PileupRow> = read_rows(&metrics);
    let metrics = &metrics[0];

    assert_eq!(columns.len() as u64, metrics.columns);
    // every simulated read is 40 bases without gaps
    assert_eq!(metrics.total_depth, metrics.total_records * 40);
    assert_eq!(columns.iter().map(|c| c.depth).sum::<u64>(), metrics.total_depth);
    assert_eq!(columns.iter().map(|c| c.depth).max(), Some(metrics.max_depth));

    for column in &columns {
        assert_eq!(column.a + column.c + column.g + column.t + column.n, column.depth);
        assert!(column.position < 3000);
        assert!("ACGTN".contains(column.consensus));
    }
    assert!(
        columns.windows(2).all(|w| (w[0].contig, w[0].position) < (w[1].contig, w[1].position))
    );
}

#[test]
fn test_min_depth_filters_rows() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("pileup.tsv");
    let mut args = vec!["simulate", "pileup", "--output", arg(&output), "--min-depth", "5"];
    args.extend_from_slice(SMALL_SIMULATION);
    run_fgpile_ok(&args);

    let columns: Vec<ColumnRow> = read_rows(&output);
    assert!(columns.iter().all(|c| c.depth >= 5));
}

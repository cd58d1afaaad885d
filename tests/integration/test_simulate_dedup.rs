//! End-to-end CLI tests for `fgpile simulate dedup`.

use std::collections::HashMap;

use serde::Deserialize;
use tempfile::TempDir;

use crate::helpers::{SMALL_SIMULATION, arg, read_rows, run_fgpile_ok};

#[derive(Debug, Deserialize)]
struct ReadRow {
    name: String,
    contig: u32,
    start: u32,
    strand: char,
    umi: u32,
    flags: u16,
    duplicate: bool,
}

#[derive(Debug, Deserialize)]
struct DedupRow {
    total_records: u64,
    unique_records: u64,
    duplicate_records: u64,
    duplicate_sets: u64,
    window_resizes: u64,
}

fn run_dedup(dir: &TempDir, extra: &[&str]) -> (Vec<ReadRow>, DedupRow) {
    let output = dir.path().join("reads.tsv");
    let metrics = dir.path().join("metrics.tsv");
    let mut args = vec!["simulate", "dedup", "--output", arg(&output), "--metrics", arg(&metrics)];
    args.extend_from_slice(SMALL_SIMULATION);
    args.extend_from_slice(extra);
    run_fgpile_ok(&args);

    let reads = read_rows(&output);
    let mut metrics: Vec<DedupRow> = read_rows(&metrics);
    assert_eq!(metrics.len(), 1);
    (reads, metrics.remove(0))
}

#[test]
fn test_one_read_kept_per_duplicate_set() {
    let dir = TempDir::new().unwrap();
    let (reads, metrics) = run_dedup(&dir, &[]);

    assert_eq!(reads.len() as u64, metrics.total_records);
    assert_eq!(metrics.unique_records + metrics.duplicate_records, metrics.total_records);
    assert!(metrics.duplicate_records > 0);
    assert!(metrics.duplicate_sets > 0);

    let mut kept: HashMap<(u32, u32, char, u32), usize> = HashMap::new();
    for read in &reads {
        let entry = kept.entry((read.contig, read.start, read.strand, read.umi)).or_default();
        if !read.duplicate {
            *entry += 1;
        }
        assert_eq!(read.duplicate, read.flags & 0x400 != 0, "flag mismatch for {}", read.name);
    }
    assert!(kept.values().all(|&n| n == 1));
    assert_eq!(kept.len() as u64, metrics.unique_records);
}

#[test]
fn test_output_is_coordinate_sorted() {
    let dir = TempDir::new().unwrap();
    let (reads, _) = run_dedup(&dir, &[]);
    assert!(reads.windows(2).all(|w| (w[0].contig, w[0].start) <= (w[1].contig, w[1].start)));
}

#[test]
fn test_small_window_grows_and_gives_same_answer() {
    let big = TempDir::new().unwrap();
    let (expected, _) = run_dedup(&big, &[]);

    let small = TempDir::new().unwrap();
    let (actual, metrics) = run_dedup(&small, &["--initial-window", "1"]);
    assert!(metrics.window_resizes > 0);

    let flags =
        |rows: &[ReadRow]| rows.iter().map(|r| (r.name.clone(), r.duplicate)).collect::<Vec<_>>();
    assert_eq!(flags(&expected), flags(&actual));
}

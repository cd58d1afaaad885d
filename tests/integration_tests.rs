//! Integration tests for fgpile.
//!
//! Run with: `cargo test --test integration_tests`
//!
//! These tests drive the scans over simulated reads end to end, spanning the key map,
//! window and library crates.

use std::collections::HashMap;

use fgpile_lib::Base;
use fgpile_lib::base_counts::{AlignedBases, BaseCountScanner, PileupColumn};
use fgpile_lib::dedup::{DuplicateCandidate, DuplicateMarker};
use fgpile_lib::flags::{FlagCounts, SamFlag, tally_flags};
use fgpile_lib::growth::GrowthPolicy;
use fgpile_lib::simulate::{FamilySizeDistribution, ReadSimulator, SimRead, SimulationParams};

fn simulate(seed: u64) -> Vec<SimRead> {
    let params = SimulationParams {
        num_molecules: 500,
        num_contigs: 3,
        ref_length: 5_000,
        read_length: 60,
        family_size: FamilySizeDistribution::negative_binomial(2.0, 0.5),
        error_rate: 0.01,
        umi_space: 8,
        seed: Some(seed),
    };
    ReadSimulator::new(params).unwrap().generate().unwrap()
}

fn mark_duplicates(policy: GrowthPolicy, reads: Vec<SimRead>) -> (Vec<SimRead>, DuplicateMarker<SimRead>) {
    let mut marker = DuplicateMarker::new(policy);
    let mut out = Vec::new();
    for read in reads {
        marker.add(read, &mut |r| out.push(r)).unwrap();
    }
    marker.finish(&mut |r| out.push(r)).unwrap();
    (out, marker)
}

#[test]
fn test_dedup_keeps_best_read_of_every_set() {
    let reads = simulate(17);
    let names: Vec<String> = reads.iter().map(|r| r.name.clone()).collect();
    let (out, marker) = mark_duplicates(GrowthPolicy::default(), reads);

    // arrival order is preserved
    assert_eq!(out.iter().map(|r| r.name.clone()).collect::<Vec<_>>(), names);

    let mut sets: HashMap<((u32, u32), (bool, u32)), Vec<&SimRead>> = HashMap::new();
    for read in &out {
        sets.entry((read.coordinate(), read.duplicate_key())).or_default().push(read);
    }
    for members in sets.values() {
        let kept: Vec<_> = members.iter().filter(|r| !r.is_duplicate()).collect();
        assert_eq!(kept.len(), 1);
        let best = members.iter().map(|r| r.score()).max().unwrap();
        assert_eq!(kept[0].score(), best);
        // earliest read wins ties
        let first_best = members.iter().find(|r| r.score() == best).unwrap();
        assert_eq!(kept[0].name, first_best.name);
    }

    let metrics = marker.metrics();
    assert_eq!(metrics.unique_records as usize, sets.len());
    assert_eq!(metrics.total_records as usize, out.len());
    assert_eq!(
        metrics.duplicate_sets as usize,
        sets.values().filter(|members| members.len() > 1).count()
    );
}

#[test]
fn test_dedup_independent_of_initial_window() {
    let (expected, _) = mark_duplicates(GrowthPolicy::default(), simulate(5));
    let (actual, marker) = mark_duplicates(GrowthPolicy::new(1, 1 << 20).unwrap(), simulate(5));
    assert_eq!(expected, actual);
    assert!(marker.metrics().window_resizes > 0);
}

#[test]
fn test_flag_tally_of_retired_reads() {
    let (out, marker) = mark_duplicates(GrowthPolicy::default(), simulate(9));
    let mut counts = FlagCounts::new_counts();
    for read in &out {
        tally_flags(&mut counts, read.flags);
    }
    assert_eq!(counts.count(SamFlag::Duplicate), marker.metrics().duplicate_records);
    assert_eq!(
        counts.count(SamFlag::Reverse),
        out.iter().filter(|r| r.is_reverse()).count() as u64
    );
    assert_eq!(counts.count(SamFlag::Unmapped), 0);
}

#[test]
fn test_pileup_matches_naive_count() {
    let reads = simulate(23);

    let mut expected: HashMap<(u32, u32), [u64; 5]> = HashMap::new();
    for read in &reads {
        for position in read.start()..read.end() {
            let base = read.base_at(position).unwrap();
            let counts = expected.entry((read.contig(), position)).or_default();
            counts[Base::ALL.iter().position(|&b| b == base).unwrap()] += 1;
        }
    }

    let mut scanner = BaseCountScanner::new(GrowthPolicy::new(2, 1 << 20).unwrap());
    let mut actual: Vec<((u32, u32), [u64; 5])> = Vec::new();
    let mut collect = |column: &PileupColumn<'_>| {
        actual.push(((column.contig, column.position), Base::ALL.map(|b| column.counts.count(b))));
    };
    for read in reads {
        scanner.add(read, &mut collect).unwrap();
    }
    scanner.finish(&mut collect).unwrap();

    assert_eq!(actual.len(), expected.len());
    assert!(actual.windows(2).all(|w| w[0].0 < w[1].0));
    for (key, counts) in &actual {
        assert_eq!(expected.get(key), Some(counts), "column {key:?}");
    }
    assert_eq!(scanner.totals().total(), scanner.metrics().total_depth);
}

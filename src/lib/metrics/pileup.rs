//! Metrics for base-count pileup scans.

use fgpile_dna::Base;
use fgpile_keymap::KeyCounts;
use serde::{Deserialize, Serialize};

use super::Metric;

/// Counts collected by [`BaseCountScanner`](crate::base_counts::BaseCountScanner).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PileupMetrics {
    /// Records pushed into the window
    pub total_records: u64,
    /// Reference positions with at least one covering base
    pub columns: u64,
    /// Sum of depth over all columns
    pub total_depth: u64,
    /// Largest depth seen in any column
    pub max_depth: u64,
    /// Mean depth over emitted columns
    pub mean_depth: f64,
    /// A bases counted
    pub a_bases: u64,
    /// C bases counted
    pub c_bases: u64,
    /// G bases counted
    pub g_bases: u64,
    /// T bases counted
    pub t_bases: u64,
    /// No-call bases counted
    pub n_bases: u64,
    /// Largest number of records resident in the window at once
    pub max_window_records: u64,
    /// Number of times the window grew
    pub window_resizes: u64,
}

impl PileupMetrics {
    /// Copies per-base totals from `counts` and recomputes derived fields.
    #[allow(clippy::cast_precision_loss)]
    pub fn finalize(&mut self, counts: &KeyCounts<Base>) {
        self.a_bases = counts.count(Base::A);
        self.c_bases = counts.count(Base::C);
        self.g_bases = counts.count(Base::G);
        self.t_bases = counts.count(Base::T);
        self.n_bases = counts.count(Base::N);
        self.mean_depth =
            if self.columns == 0 { 0.0 } else { self.total_depth as f64 / self.columns as f64 };
    }
}

impl Metric for PileupMetrics {
    fn metric_name() -> &'static str {
        "pileup"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_copies_base_totals() {
        let mut counts: KeyCounts<Base> = KeyCounts::new_counts();
        counts.add(Base::A, 3);
        counts.add(Base::N, 1);

        let mut metrics = PileupMetrics { columns: 2, total_depth: 4, ..Default::default() };
        metrics.finalize(&counts);
        assert_eq!(metrics.a_bases, 3);
        assert_eq!(metrics.c_bases, 0);
        assert_eq!(metrics.n_bases, 1);
        assert!((metrics.mean_depth - 2.0).abs() < f64::EPSILON);
    }
}

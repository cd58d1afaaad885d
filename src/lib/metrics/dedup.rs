//! Metrics for streaming duplicate marking.

use serde::{Deserialize, Serialize};

use super::Metric;

/// Counts collected by [`DuplicateMarker`](crate::dedup::DuplicateMarker).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DedupMetrics {
    /// Records pushed into the window
    pub total_records: u64,
    /// Records kept as the representative of their duplicate set
    pub unique_records: u64,
    /// Records marked as duplicates
    pub duplicate_records: u64,
    /// Fraction of records marked as duplicates
    pub duplicate_rate: f64,
    /// Distinct coordinates resolved
    pub position_groups: u64,
    /// Duplicate sets with more than one member
    pub duplicate_sets: u64,
    /// Largest number of records resident in the window at once
    pub max_window_records: u64,
    /// Window capacity when the scan finished
    pub window_capacity: u64,
    /// Number of times the window grew
    pub window_resizes: u64,
}

impl DedupMetrics {
    /// Recomputes derived fields from the counts.
    #[allow(clippy::cast_precision_loss)]
    pub fn finalize(&mut self) {
        self.duplicate_rate = if self.total_records == 0 {
            0.0
        } else {
            self.duplicate_records as f64 / self.total_records as f64
        };
    }

    /// Merge another `DedupMetrics` into this one.
    pub fn merge(&mut self, other: &DedupMetrics) {
        self.total_records += other.total_records;
        self.unique_records += other.unique_records;
        self.duplicate_records += other.duplicate_records;
        self.position_groups += other.position_groups;
        self.duplicate_sets += other.duplicate_sets;
        self.max_window_records = self.max_window_records.max(other.max_window_records);
        self.window_capacity = self.window_capacity.max(other.window_capacity);
        self.window_resizes += other.window_resizes;
        self.finalize();
    }
}

impl Metric for DedupMetrics {
    fn metric_name() -> &'static str {
        "dedup"
    }
}

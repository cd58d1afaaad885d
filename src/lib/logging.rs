//! Logging utilities for formatted output.
//!
//! This module provides consistent, user-friendly formatting for counts, rates and
//! durations, plus summary loggers for the streaming scans.

use std::time::{Duration, Instant};

use crate::flags::FlagCounts;
use crate::metrics::{DedupMetrics, PileupMetrics};

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use fgpile_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use fgpile_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration in human-readable form (e.g. "45s", "2m 15s", "1h 30m").
///
/// # Examples
///
/// ```
/// use fgpile_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let (mins, rest) = (secs / 60, secs % 60);
        if rest == 0 { format!("{mins}m") } else { format!("{mins}m {rest}s") }
    } else {
        let (hours, mins) = (secs / 3600, (secs % 3600) / 60);
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing rate, switching to per-minute units below one item per second.
///
/// # Examples
///
/// ```
/// use fgpile_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1)), "1,000 records/s");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        format!("{:.1} records/min", count as f64 / (secs / 60.0))
    }
}

/// Logs a summary of duplicate marking.
pub fn log_dedup_summary(metrics: &DedupMetrics) {
    log::info!("Duplicate Marking Summary:");
    log::info!("  Total records: {}", format_count(metrics.total_records));
    log::info!("  Unique records: {}", format_count(metrics.unique_records));
    log::info!("  Duplicate records: {}", format_count(metrics.duplicate_records));
    if metrics.total_records > 0 {
        log::info!("  Duplicate rate: {}", format_percent(metrics.duplicate_rate, 2));
    }
    log::info!("  Position groups: {}", format_count(metrics.position_groups));
    log::info!("  Duplicate sets: {}", format_count(metrics.duplicate_sets));
    log::info!(
        "  Window: {} records max, capacity {} after {} resizes",
        format_count(metrics.max_window_records),
        format_count(metrics.window_capacity),
        metrics.window_resizes
    );
}

/// Logs a summary of a pileup scan.
pub fn log_pileup_summary(metrics: &PileupMetrics) {
    log::info!("Pileup Summary:");
    log::info!("  Total records: {}", format_count(metrics.total_records));
    log::info!("  Columns: {}", format_count(metrics.columns));
    if metrics.columns > 0 {
        log::info!("  Mean depth: {:.2}", metrics.mean_depth);
        log::info!("  Max depth: {}", format_count(metrics.max_depth));
    }
    log::info!(
        "  Bases: A={} C={} G={} T={} N={}",
        format_count(metrics.a_bases),
        format_count(metrics.c_bases),
        format_count(metrics.g_bases),
        format_count(metrics.t_bases),
        format_count(metrics.n_bases)
    );
    log::info!(
        "  Window: {} records max after {} resizes",
        format_count(metrics.max_window_records),
        metrics.window_resizes
    );
}

/// Logs every non-zero flag tally.
pub fn log_flag_counts(counts: &FlagCounts) {
    log::info!("Flag counts:");
    for (flag, count) in counts.iter().filter(|&(_, &count)| count > 0) {
        log::info!("  {flag}: {}", format_count(*count));
    }
}

/// Operation timing and summary helper.
///
/// # Examples
///
/// ```no_run
/// use fgpile_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Marking duplicates");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}

//! Metrics collected by the streaming scans and their TSV output.
//!
//! - [`dedup`] - duplicate marking metrics
//! - [`pileup`] - base-count pileup metrics
//!
//! Every metric type implements [`Metric`] and is written with [`write_metrics`], one row
//! per value, via `fgoxide`'s delimited-file support.

pub mod dedup;
pub mod pileup;

use std::path::Path;

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::{Deserialize, Serialize};

pub use dedup::DedupMetrics;
pub use pileup::PileupMetrics;

/// Number of decimal places used for float metrics.
pub const FLOAT_PRECISION: usize = 6;

/// Formats a float value with the standard precision for metrics.
///
/// # Example
/// ```
/// use fgpile_lib::metrics::format_float;
/// assert_eq!(format_float(0.25), "0.250000");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:.FLOAT_PRECISION$}")
}

/// A metric row type that can be serialized to a TSV file.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name used in log and error messages.
    fn metric_name() -> &'static str;
}

/// Writes `metrics` as a TSV file with a header row.
///
/// # Errors
///
/// Returns an error naming the metric type if the file cannot be written.
pub fn write_metrics<T: Metric, P: AsRef<Path>>(path: P, metrics: &[T]) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default()
        .write_tsv(&path_ref, metrics)
        .with_context(|| format!("Failed to write {} metrics: {}", T::metric_name(), path_ref.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let metrics = vec![DedupMetrics { total_records: 10, duplicate_records: 4, ..Default::default() }];

        write_metrics(temp_file.path(), &metrics)?;

        let read: Vec<DedupMetrics> = DelimFile::default().read_tsv(&temp_file.path())?;
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].total_records, 10);
        assert_eq!(read[0].duplicate_records, 4);
        Ok(())
    }

    #[test]
    fn test_write_invalid_path() {
        let metrics = vec![PileupMetrics::default()];
        let err = write_metrics("/invalid/path/metrics.txt", &metrics).unwrap_err();
        assert!(err.to_string().contains("Failed to write pileup metrics"));
    }
}

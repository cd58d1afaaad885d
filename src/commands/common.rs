//! Common CLI options shared across commands.
//!
//! These argument groups are composed into command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use fgpile_lib::growth::{DEFAULT_INITIAL_WINDOW, DEFAULT_MAX_WINDOW, GrowthPolicy};
use fgpile_lib::metrics::{Metric, write_metrics};

/// Sizing of the record window used by the streaming scans.
#[derive(Debug, Clone, Args)]
pub struct WindowOptions {
    /// Number of records the window starts with
    #[arg(long = "initial-window", default_value_t = DEFAULT_INITIAL_WINDOW)]
    pub initial_window: usize,

    /// Maximum number of records the window may grow to. For pileups this must cover every
    /// record starting within one read length of the longest read.
    #[arg(long = "max-window", default_value_t = DEFAULT_MAX_WINDOW)]
    pub max_window: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self { initial_window: DEFAULT_INITIAL_WINDOW, max_window: DEFAULT_MAX_WINDOW }
    }
}

impl WindowOptions {
    /// Builds the validated growth policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial window is zero or exceeds the maximum.
    pub fn growth_policy(&self) -> Result<GrowthPolicy> {
        Ok(GrowthPolicy::new(self.initial_window, self.max_window)?)
    }
}

/// Options for writing metrics to a file.
#[derive(Debug, Clone, Default, Args)]
pub struct MetricsOptions {
    /// Optional output file for metrics
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,
}

impl MetricsOptions {
    /// Writes `metric` as a one-row TSV if a metrics path was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write<T: Metric>(&self, metric: &T) -> Result<()> {
        if let Some(path) = &self.metrics {
            write_metrics(path, std::slice::from_ref(metric))?;
            log::info!("Wrote {} metrics to {}", T::metric_name(), path.display());
        }
        Ok(())
    }
}

//! Window sizing for streaming scans.
//!
//! A scan starts with a small [`RecordPileup`] and, when a push finds the window full, doubles
//! it up to a configured ceiling. Growing preserves every live handle. Past the ceiling the
//! scan fails with [`FgpileError::WindowExhausted`] rather than dropping records.

use fgpile_window::{RecordHandle, RecordPileup};
use log::debug;

use crate::errors::{FgpileError, Result};
use crate::validation::{validate_min_max, validate_positive};

/// Default number of records a window starts with.
pub const DEFAULT_INITIAL_WINDOW: usize = 1024;

/// Default ceiling on the number of records a window may grow to.
pub const DEFAULT_MAX_WINDOW: usize = 4 * 1024 * 1024;

/// Initial and maximum window capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    initial_capacity: usize,
    max_capacity: usize,
}

impl GrowthPolicy {
    /// Creates a policy, validating `0 < initial_capacity <= max_capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`FgpileError::InvalidParameter`] for a zero or inverted range.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Result<Self> {
        validate_positive(initial_capacity, "initial-window")?;
        validate_min_max(initial_capacity, max_capacity, "initial-window", "max-window")?;
        Ok(Self { initial_capacity, max_capacity })
    }

    /// Capacity a new window starts with.
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Largest capacity a window may grow to.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Builds an empty window at the initial capacity.
    #[must_use]
    pub fn new_pileup<R>(&self) -> RecordPileup<R> {
        RecordPileup::new(self.initial_capacity)
    }

    /// Pushes `record`, first growing a full window.
    ///
    /// Returns the record's handle and whether the window grew.
    ///
    /// # Errors
    ///
    /// Returns [`FgpileError::WindowExhausted`] if the window is full at the maximum capacity,
    /// or a window error if the logical index space is exhausted.
    pub fn push<R>(&self, pileup: &mut RecordPileup<R>, record: R) -> Result<(RecordHandle, bool)> {
        let mut grew = false;
        if pileup.is_full() {
            let current = pileup.capacity();
            if current >= self.max_capacity {
                return Err(FgpileError::WindowExhausted { max_capacity: self.max_capacity });
            }
            let next = current.saturating_mul(2).clamp(1, self.max_capacity);
            debug!("Growing window from {current} to {next} records");
            pileup.grow(next)?;
            grew = true;
        }
        Ok((pileup.push(record)?, grew))
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_INITIAL_WINDOW, max_capacity: DEFAULT_MAX_WINDOW }
    }
}

#![deny(unsafe_code)]

//! Bounded sliding windows with stable logical indices.
//!
//! This crate provides:
//! - [`CircularBuffer`] - fixed-capacity FIFO addressed by monotonically increasing
//!   [`WindowIndex`] values that survive physical wraparound
//! - [`RecordPileup`] - the buffer specialized for streaming record scans, handing out
//!   [`RecordHandle`]s that can be walked forward and mutated in place until retired
//!
//! Both are single-owner containers with no internal synchronization. Storage is allocated
//! when the window is built and otherwise only on an explicit `grow`.

pub mod buffer;
pub mod pileup;

use thiserror::Error;

pub use buffer::{CircularBuffer, WindowIndex};
pub use pileup::{RecordHandle, RecordPileup};

/// Result type alias for window operations.
pub type Result<T> = std::result::Result<T, WindowError>;

/// Errors raised by [`CircularBuffer`] and [`RecordPileup`].
///
/// A failed operation never mutates the window.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// Push on a full window; drain or grow it and retry
    #[error("Window is full ({capacity} records)")]
    BufferFull {
        /// Capacity of the window
        capacity: usize,
    },

    /// Pop or peek on an empty window
    #[error("Window is empty")]
    BufferEmpty,

    /// Access to an index that is not live
    #[error("Index {index} is outside the live window [{head}, {tail})")]
    IndexOutOfRange {
        /// The requested logical index
        index: u64,
        /// Oldest live index
        head: u64,
        /// One past the newest live index
        tail: u64,
    },

    /// The logical index space is exhausted
    #[error("Logical index space exhausted")]
    IndexOverflow,

    /// Resize to a capacity that cannot hold the live elements
    #[error("Cannot resize window to {requested} slots while {live} records are live")]
    CapacityTooSmall {
        /// Requested capacity
        requested: usize,
        /// Number of live elements
        live: usize,
    },
}

impl WindowError {
    /// Returns true for capacity exhaustion, which the caller handles by draining or growing.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BufferFull { .. })
    }

    /// Returns true if the window can no longer be used safely.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::IndexOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(WindowError::BufferFull { capacity: 8 }, "Window is full (8 records)", true, false)]
    #[case(WindowError::BufferEmpty, "Window is empty", false, false)]
    #[case(
        WindowError::IndexOutOfRange { index: 2, head: 3, tail: 5 },
        "Index 2 is outside the live window [3, 5)",
        false,
        false
    )]
    #[case(WindowError::IndexOverflow, "Logical index space exhausted", false, true)]
    fn test_error_classification(
        #[case] error: WindowError,
        #[case] message: &str,
        #[case] recoverable: bool,
        #[case] fatal: bool,
    ) {
        assert_eq!(error.to_string(), message);
        assert_eq!(error.is_recoverable(), recoverable);
        assert_eq!(error.is_fatal(), fatal);
    }
}

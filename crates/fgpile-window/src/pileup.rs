//! A sliding window of alignment records with stable handles.
//!
//! [`RecordPileup`] wraps a [`CircularBuffer`] for the access pattern of streaming scans:
//! records arrive in sort order and get a [`RecordHandle`]; a scan walks handles forward from
//! the front of the window, reading and flagging records in place, and stops once
//! [`RecordPileup::is_past_window`] is true. Records leave the window only through
//! [`RecordPileup::pop_front`], so output order always equals arrival order.
//!
//! # Example
//!
//! ```
//! use fgpile_window::RecordPileup;
//!
//! let mut pileup = RecordPileup::new(4);
//! let first = pileup.push(("read1", false)).unwrap();
//! pileup.push(("read2", false)).unwrap();
//!
//! // walk the window and flag every record
//! let mut handle = first;
//! while !pileup.is_past_window(handle) {
//!     pileup.read_at_mut(handle).unwrap().1 = true;
//!     handle = pileup.next_handle(handle);
//! }
//!
//! assert_eq!(pileup.pop_front().unwrap(), ("read1", true));
//! assert_eq!(pileup.pop_front().unwrap(), ("read2", true));
//! ```

use std::fmt;

use crate::Result;
use crate::buffer::{CircularBuffer, WindowIndex};

/// Opaque handle to a record resident in a [`RecordPileup`].
///
/// Valid from the push that returned it until the record is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordHandle(WindowIndex);

impl RecordHandle {
    /// The logical window index behind this handle.
    #[must_use]
    pub const fn index(self) -> WindowIndex {
        self.0
    }
}

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sliding window of records, retired strictly in arrival order.
pub struct RecordPileup<R> {
    window: CircularBuffer<R>,
}

impl<R> RecordPileup<R> {
    /// Creates an empty window holding at most `capacity` records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { window: CircularBuffer::new(capacity) }
    }

    /// Adds a record at the back of the window.
    ///
    /// # Errors
    ///
    /// Fails with [`WindowError::BufferFull`](crate::WindowError::BufferFull) when the window
    /// is full; the caller should retire records or [`grow`](Self::grow) the window.
    pub fn push(&mut self, record: R) -> Result<RecordHandle> {
        self.window.push(record).map(RecordHandle)
    }

    /// Returns true if `handle` is the most recently pushed record.
    #[inline]
    #[must_use]
    pub fn is_newest(&self, handle: RecordHandle) -> bool {
        self.window.is_last(handle.0)
    }

    /// The handle immediately after `handle`.
    #[inline]
    #[must_use]
    pub fn next_handle(&self, handle: RecordHandle) -> RecordHandle {
        RecordHandle(handle.0.next())
    }

    /// Returns true if `handle` is at or beyond the tail, i.e. a forward walk has run off the
    /// live window.
    #[inline]
    #[must_use]
    pub fn is_past_window(&self, handle: RecordHandle) -> bool {
        handle.0 >= self.window.tail_index()
    }

    /// Handle of the oldest live record, if any.
    #[must_use]
    pub fn front_handle(&self) -> Option<RecordHandle> {
        (!self.window.is_empty()).then(|| RecordHandle(self.window.head_index()))
    }

    /// Handles of all live records, oldest first.
    pub fn handles(&self) -> impl Iterator<Item = RecordHandle> + use<R> {
        let (head, tail) = (self.window.head_index().value(), self.window.tail_index().value());
        (head..tail).map(|i| RecordHandle(WindowIndex::new(i)))
    }

    /// The live record behind `handle`.
    ///
    /// # Errors
    ///
    /// Fails with [`WindowError::IndexOutOfRange`](crate::WindowError::IndexOutOfRange) if the
    /// record was already retired or the handle is past the window.
    pub fn read_at(&self, handle: RecordHandle) -> Result<&R> {
        self.window.read_at(handle.0)
    }

    /// Mutable access to the live record behind `handle`.
    ///
    /// # Errors
    ///
    /// Same as [`read_at`](Self::read_at).
    pub fn read_at_mut(&mut self, handle: RecordHandle) -> Result<&mut R> {
        self.window.read_at_mut(handle.0)
    }

    /// Replaces the live record behind `handle`, returning the previous record.
    ///
    /// # Errors
    ///
    /// Same as [`read_at`](Self::read_at).
    pub fn update_at(&mut self, handle: RecordHandle, record: R) -> Result<R> {
        self.window.update_at(handle.0, record)
    }

    /// Retires the oldest record.
    ///
    /// # Errors
    ///
    /// Fails with [`WindowError::BufferEmpty`](crate::WindowError::BufferEmpty) if the window
    /// is empty.
    pub fn pop_front(&mut self) -> Result<R> {
        self.window.pop_front()
    }

    /// Retires the oldest record if it satisfies `ready`.
    pub fn pop_front_if<F: FnOnce(&R) -> bool>(&mut self, ready: F) -> Option<R> {
        match self.window.front() {
            Ok(record) if ready(record) => self.window.pop_front().ok(),
            _ => None,
        }
    }

    /// The oldest live record.
    ///
    /// # Errors
    ///
    /// Fails with [`WindowError::BufferEmpty`](crate::WindowError::BufferEmpty) if empty.
    pub fn front(&self) -> Result<&R> {
        self.window.front()
    }

    /// The newest live record.
    ///
    /// # Errors
    ///
    /// Fails with [`WindowError::BufferEmpty`](crate::WindowError::BufferEmpty) if empty.
    pub fn back(&self) -> Result<&R> {
        self.window.back()
    }

    /// Enlarges the window to `capacity` records; live handles stay valid.
    ///
    /// # Errors
    ///
    /// Fails with [`WindowError::CapacityTooSmall`](crate::WindowError::CapacityTooSmall) if
    /// `capacity` cannot hold the live records.
    pub fn grow(&mut self, capacity: usize) -> Result<()> {
        self.window.grow(capacity)
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns true if no record is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns true if the next push would fail.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Maximum number of live records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Total records pushed over the window's life.
    #[must_use]
    pub fn pushed_count(&self) -> u64 {
        self.window.pushed_count()
    }

    /// Total records retired over the window's life.
    #[must_use]
    pub fn popped_count(&self) -> u64 {
        self.window.popped_count()
    }
}

impl<R: fmt::Debug> fmt::Debug for RecordPileup<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordPileup").field("window", &self.window).finish()
    }
}

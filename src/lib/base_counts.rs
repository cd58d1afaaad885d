//! Per-position base counts over a coordinate-sorted record stream.
//!
//! [`BaseCountScanner`] keeps every record overlapping the scan position in a
//! [`RecordPileup`]. When a record starting at position `p` arrives, every column before `p`
//! is complete: the scanner walks the window for each such column, counts the aligned base
//! of each covering record into a reused [`KeyCounts<Base>`], and hands the column to the
//! caller. Records whose alignment ends at or before the scan position are retired from the
//! front of the window.
//!
//! Retirement follows arrival order, so a short record that ends behind a longer front record
//! stays in the window, and is re-scanned for every column, until the front record ends. With
//! long reads the window must hold every record starting within one read length, which is what
//! `--max-window` has to cover.

use fgpile_dna::Base;
use fgpile_keymap::KeyCounts;
use fgpile_window::RecordPileup;
use log::debug;

use crate::errors::{FgpileError, Result};
use crate::growth::GrowthPolicy;
use crate::metrics::PileupMetrics;

/// A record aligned to a reference contig.
pub trait AlignedBases {
    /// Index of the reference contig.
    fn contig(&self) -> u32;

    /// 0-based position of the first aligned base.
    fn start(&self) -> u32;

    /// 0-based position one past the last aligned base.
    fn end(&self) -> u32;

    /// The base aligned to `position`, or `None` outside the alignment or within a deletion.
    fn base_at(&self, position: u32) -> Option<Base>;
}

/// Base counts at one reference position.
#[derive(Debug, Clone, Copy)]
pub struct PileupColumn<'a> {
    /// Reference contig index
    pub contig: u32,
    /// 0-based reference position
    pub position: u32,
    /// Count per base among the covering records
    pub counts: &'a KeyCounts<Base>,
}

impl PileupColumn<'_> {
    /// Number of bases counted in this column.
    #[must_use]
    pub fn depth(&self) -> u64 {
        self.counts.total()
    }

    /// The most frequent called base, preferring the earliest in `A, C, G, T` on ties.
    #[must_use]
    pub fn consensus(&self) -> Option<Base> {
        Base::CALLED
            .iter()
            .copied()
            .filter(|&base| self.counts.count(base) > 0)
            .fold(None, |best: Option<Base>, base| match best {
                Some(b) if self.counts.count(b) >= self.counts.count(base) => Some(b),
                _ => Some(base),
            })
    }
}

/// Emits pileup columns from a coordinate-sorted stream of aligned records.
pub struct BaseCountScanner<R: AlignedBases> {
    policy: GrowthPolicy,
    pileup: RecordPileup<R>,
    column: KeyCounts<Base>,
    totals: KeyCounts<Base>,
    contig: Option<u32>,
    position: u32,
    last_start: Option<(u32, u32)>,
    metrics: PileupMetrics,
}

impl<R: AlignedBases> BaseCountScanner<R> {
    /// Creates a scanner whose window is sized by `policy`.
    #[must_use]
    pub fn new(policy: GrowthPolicy) -> Self {
        Self {
            pileup: policy.new_pileup(),
            policy,
            column: KeyCounts::new_counts(),
            totals: KeyCounts::new_counts(),
            contig: None,
            position: 0,
            last_start: None,
            metrics: PileupMetrics::default(),
        }
    }

    /// Adds the next record, emitting every column that can no longer change.
    ///
    /// # Errors
    ///
    /// Returns [`FgpileError::UnsortedInput`] if the record sorts before the previous one and
    /// [`FgpileError::WindowExhausted`] if too many records overlap at once. Columns before the
    /// record's start are emitted before the push, so on `WindowExhausted` they stay emitted and
    /// the rejected start remains the floor for later records; the record itself is dropped.
    pub fn add<F>(&mut self, record: R, emit: &mut F) -> Result<()>
    where
        F: FnMut(&PileupColumn<'_>),
    {
        let key = (record.contig(), record.start());
        if let Some(previous) = self.last_start
            && key < previous
        {
            return Err(FgpileError::UnsortedInput {
                record_number: self.metrics.total_records + 1,
                found: format!("{}:{}", key.0, key.1),
                previous: format!("{}:{}", previous.0, previous.1),
            });
        }
        self.last_start = Some(key);

        if self.contig != Some(key.0) {
            self.emit_columns(None, emit)?;
            debug!("Starting contig {}", key.0);
            self.contig = Some(key.0);
            self.position = key.1;
        } else {
            self.emit_columns(Some(key.1), emit)?;
        }

        let (_, grew) = self.policy.push(&mut self.pileup, record)?;
        if grew {
            self.metrics.window_resizes += 1;
        }
        self.metrics.total_records += 1;
        self.metrics.max_window_records = self.metrics.max_window_records.max(self.pileup.len() as u64);
        Ok(())
    }

    /// Emits every remaining column.
    ///
    /// # Errors
    ///
    /// Returns an error only if the window is internally inconsistent.
    pub fn finish<F>(&mut self, emit: &mut F) -> Result<()>
    where
        F: FnMut(&PileupColumn<'_>),
    {
        self.emit_columns(None, emit)?;
        self.metrics.finalize(&self.totals);
        Ok(())
    }

    /// Metrics collected so far; per-base totals and mean depth are final after
    /// [`finish`](Self::finish).
    #[must_use]
    pub fn metrics(&self) -> &PileupMetrics {
        &self.metrics
    }

    /// Base counts summed over every emitted column.
    #[must_use]
    pub fn totals(&self) -> &KeyCounts<Base> {
        &self.totals
    }

    /// Emits columns at positions below `limit`, or until the window drains when `limit` is
    /// `None`.
    fn emit_columns<F>(&mut self, limit: Option<u32>, emit: &mut F) -> Result<()>
    where
        F: FnMut(&PileupColumn<'_>),
    {
        let Some(contig) = self.contig else {
            return Ok(());
        };
        loop {
            let position = self.position;
            while self.pileup.pop_front_if(|r| r.end() <= position).is_some() {}

            let Ok(front) = self.pileup.front() else {
                break;
            };
            // skip uncovered positions
            self.position = self.position.max(front.start());
            if limit.is_some_and(|limit| self.position >= limit) {
                break;
            }

            self.count_column()?;
            let depth = self.column.total();
            if depth > 0 {
                self.metrics.columns += 1;
                self.metrics.total_depth += depth;
                self.metrics.max_depth = self.metrics.max_depth.max(depth);
                self.totals.merge(&self.column);
                emit(&PileupColumn { contig, position: self.position, counts: &self.column });
            }
            self.position += 1;
        }
        Ok(())
    }

    /// Counts the bases of every record covering the current position.
    fn count_column(&mut self) -> Result<()> {
        self.column.clear();
        let Some(mut handle) = self.pileup.front_handle() else {
            return Ok(());
        };
        while !self.pileup.is_past_window(handle) {
            let record = self.pileup.read_at(handle)?;
            if record.start() > self.position {
                break;
            }
            if let Some(base) = record.base_at(self.position) {
                self.column.increment(base);
            }
            handle = self.pileup.next_handle(handle);
        }
        Ok(())
    }
}

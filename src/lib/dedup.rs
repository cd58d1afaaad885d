//! Streaming duplicate marking over a coordinate-sorted record stream.
//!
//! Records are pushed into a [`RecordPileup`] as they arrive. Records that share a
//! coordinate form a position group; a group is resolved once a record at a later coordinate
//! shows up, because only then is it known to be complete. Groups are resolved as soon as they
//! close, so the window only ever holds the open group and closing it walks each record a
//! fixed number of times. Within a group, records with equal
//! duplicate keys form a duplicate set: the highest-scoring record is kept (the earliest wins
//! ties) and the rest are flagged. Resolved records leave the window in arrival order, so the
//! output order always equals the input order.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;
use fgpile_window::{RecordHandle, RecordPileup};
use log::debug;

use crate::errors::{FgpileError, Result};
use crate::growth::GrowthPolicy;
use crate::metrics::DedupMetrics;

/// A record that can take part in duplicate marking.
pub trait DuplicateCandidate {
    /// Sort coordinate; records at equal coordinates are compared with each other.
    type Coordinate: Ord + Copy + fmt::Debug;

    /// Identity within a coordinate; records with equal keys are duplicates of each other.
    type Key: Eq + Hash + Copy;

    /// The record's sort coordinate.
    fn coordinate(&self) -> Self::Coordinate;

    /// The record's duplicate key.
    fn duplicate_key(&self) -> Self::Key;

    /// Quality score used to pick the representative of a duplicate set.
    fn score(&self) -> u32;

    /// Returns true if the record is flagged as a duplicate.
    fn is_duplicate(&self) -> bool;

    /// Sets or clears the duplicate flag.
    fn set_duplicate(&mut self, duplicate: bool);
}

/// Best record seen so far for one duplicate key.
#[derive(Debug, Clone, Copy)]
struct SetLeader {
    handle: RecordHandle,
    score: u32,
    members: u64,
}

/// Marks duplicates in a coordinate-sorted stream using a growable window.
pub struct DuplicateMarker<R: DuplicateCandidate> {
    policy: GrowthPolicy,
    pileup: RecordPileup<R>,
    leaders: AHashMap<R::Key, SetLeader>,
    last_coordinate: Option<R::Coordinate>,
    metrics: DedupMetrics,
}

impl<R: DuplicateCandidate> DuplicateMarker<R> {
    /// Creates a marker whose window is sized by `policy`.
    #[must_use]
    pub fn new(policy: GrowthPolicy) -> Self {
        Self {
            pileup: policy.new_pileup(),
            policy,
            leaders: AHashMap::new(),
            last_coordinate: None,
            metrics: DedupMetrics::default(),
        }
    }

    /// Adds the next record, passing every record whose group is now resolved to `emit`.
    ///
    /// # Errors
    ///
    /// Returns [`FgpileError::UnsortedInput`] if `record` sorts before the previous record and
    /// [`FgpileError::WindowExhausted`] if a single group outgrows the maximum window. The
    /// rejected record is dropped; records already in the window are unaffected.
    pub fn add<F: FnMut(R)>(&mut self, record: R, emit: &mut F) -> Result<()> {
        let coordinate = record.coordinate();
        if let Some(previous) = self.last_coordinate {
            if coordinate < previous {
                return Err(FgpileError::UnsortedInput {
                    record_number: self.metrics.total_records + 1,
                    found: format!("{coordinate:?}"),
                    previous: format!("{previous:?}"),
                });
            }
            if coordinate != previous {
                self.resolve_group(emit)?;
            }
        }

        let (_, grew) = self.policy.push(&mut self.pileup, record)?;
        if grew {
            self.metrics.window_resizes += 1;
        }
        self.metrics.total_records += 1;
        self.metrics.max_window_records = self.metrics.max_window_records.max(self.pileup.len() as u64);
        self.last_coordinate = Some(coordinate);
        Ok(())
    }

    /// Resolves and emits every remaining record.
    ///
    /// # Errors
    ///
    /// Returns an error only if the window is internally inconsistent.
    pub fn finish<F: FnMut(R)>(&mut self, emit: &mut F) -> Result<()> {
        self.resolve_group(emit)?;
        self.metrics.window_capacity = self.pileup.capacity() as u64;
        self.metrics.finalize();
        Ok(())
    }

    /// Metrics collected so far; rates are final after [`finish`](Self::finish).
    #[must_use]
    pub fn metrics(&self) -> &DedupMetrics {
        &self.metrics
    }

    /// Number of records waiting in the window.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pileup.len()
    }

    /// Marks the open group, which is every record in the window, and drains it in order.
    fn resolve_group<F: FnMut(R)>(&mut self, emit: &mut F) -> Result<()> {
        let Some(front) = self.pileup.front_handle() else {
            return Ok(());
        };
        self.mark_group(front)?;
        while !self.pileup.is_empty() {
            emit(self.pileup.pop_front()?);
        }
        Ok(())
    }

    /// Flags every record from `start` to the back of the window that is not the leader of its
    /// duplicate set.
    fn mark_group(&mut self, start: RecordHandle) -> Result<()> {
        self.leaders.clear();

        let mut handle = start;
        while !self.pileup.is_past_window(handle) {
            let record = self.pileup.read_at(handle)?;
            let score = record.score();
            self.leaders
                .entry(record.duplicate_key())
                .and_modify(|leader| {
                    leader.members += 1;
                    if score > leader.score {
                        leader.handle = handle;
                        leader.score = score;
                    }
                })
                .or_insert(SetLeader { handle, score, members: 1 });
            handle = self.pileup.next_handle(handle);
        }

        let mut handle = start;
        while !self.pileup.is_past_window(handle) {
            let record = self.pileup.read_at_mut(handle)?;
            let keep = self.leaders.get(&record.duplicate_key()).is_some_and(|l| l.handle == handle);
            record.set_duplicate(!keep);
            if keep {
                self.metrics.unique_records += 1;
            } else {
                self.metrics.duplicate_records += 1;
            }
            handle = self.pileup.next_handle(handle);
        }

        let sets = self.leaders.values().filter(|leader| leader.members > 1).count() as u64;
        debug!(
            "Resolved group of {} records at {start}: {} keys, {sets} duplicate sets",
            self.pileup.len(),
            self.leaders.len()
        );
        self.metrics.position_groups += 1;
        self.metrics.duplicate_sets += sets;
        Ok(())
    }
}

impl<R: DuplicateCandidate + fmt::Debug> fmt::Debug for DuplicateMarker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateMarker")
            .field("policy", &self.policy)
            .field("pileup", &self.pileup)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

//! Fixed-capacity circular buffer addressed by stable logical indices.
//!
//! Every pushed element receives a [`WindowIndex`] one greater than the previous push. The
//! element stays addressable by that index until it is popped, regardless of how often the
//! physical storage wraps around:
//!
//! ```text
//!   capacity = 4, head = 6, tail = 9
//!
//!   physical slot:   0      1      2      3
//!                  [ i=8 | ---- | i=6 | i=7 ]
//!                                  ^head        i mod 4 == slot
//! ```
//!
//! Slots are allocated once in [`CircularBuffer::new`] and again only by an explicit
//! [`CircularBuffer::grow`].

use std::fmt;

use log::debug;

use crate::{Result, WindowError};

/// Logical index of an element pushed into a [`CircularBuffer`].
///
/// Indices strictly increase with every push and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WindowIndex(u64);

impl WindowIndex {
    /// Wraps a raw logical index value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw logical index value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The index immediately following this one, saturating at `u64::MAX`.
    ///
    /// A buffer can never hold an element at `u64::MAX` (pushing it would overflow the tail),
    /// so a saturated index is always past the window.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for WindowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A FIFO of at most `capacity` elements with O(1) random access by [`WindowIndex`].
///
/// The buffer exclusively owns its slots; it is intentionally not `Clone`.
pub struct CircularBuffer<T> {
    /// Physical storage; the element with logical index `i` lives at `i % slots.len()`.
    slots: Box<[Option<T>]>,
    /// Logical index of the oldest live element (number of pops so far).
    head: u64,
    /// Logical index the next push receives (number of pushes so far).
    tail: u64,
}

impl<T> CircularBuffer<T> {
    /// Creates an empty buffer with exactly `capacity` preallocated slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { slots: empty_slots(capacity), head: 0, tail: 0 }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn slot(&self, index: u64) -> usize {
        // callers guarantee a live index, so the slot array is non-empty
        (index % self.slots.len() as u64) as usize
    }

    #[inline]
    fn check_live(&self, index: WindowIndex) -> Result<usize> {
        if index.0 < self.head || index.0 >= self.tail {
            return Err(WindowError::IndexOutOfRange {
                index: index.0,
                head: self.head,
                tail: self.tail,
            });
        }
        Ok(self.slot(index.0))
    }

    /// Appends `item` at the back and returns its logical index.
    ///
    /// # Errors
    ///
    /// - [`WindowError::BufferFull`] if `len() == capacity()`; the item is dropped and the
    ///   buffer is unchanged.
    /// - [`WindowError::IndexOverflow`] if the logical index space is exhausted.
    pub fn push(&mut self, item: T) -> Result<WindowIndex> {
        if self.is_full() {
            return Err(WindowError::BufferFull { capacity: self.capacity() });
        }
        let next_tail = self.tail.checked_add(1).ok_or(WindowError::IndexOverflow)?;
        let index = self.tail;
        let slot = self.slot(index);
        self.slots[slot] = Some(item);
        self.tail = next_tail;
        Ok(WindowIndex(index))
    }

    /// Removes and returns the oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::BufferEmpty`] if there is nothing to pop.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(WindowError::BufferEmpty);
        }
        let slot = self.slot(self.head);
        let item = self.slots[slot].take().ok_or(WindowError::IndexOutOfRange {
            index: self.head,
            head: self.head,
            tail: self.tail,
        })?;
        self.head += 1;
        Ok(item)
    }

    /// The oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::BufferEmpty`] if the buffer is empty.
    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(WindowError::BufferEmpty);
        }
        self.read_at(WindowIndex(self.head))
    }

    /// The most recently pushed element.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::BufferEmpty`] if the buffer is empty.
    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(WindowError::BufferEmpty);
        }
        self.read_at(WindowIndex(self.tail - 1))
    }

    /// The live element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::IndexOutOfRange`] unless `head <= index < tail`.
    pub fn read_at(&self, index: WindowIndex) -> Result<&T> {
        let slot = self.check_live(index)?;
        self.slots[slot].as_ref().ok_or(WindowError::IndexOutOfRange {
            index: index.0,
            head: self.head,
            tail: self.tail,
        })
    }

    /// Mutable access to the live element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::IndexOutOfRange`] unless `head <= index < tail`.
    pub fn read_at_mut(&mut self, index: WindowIndex) -> Result<&mut T> {
        let slot = self.check_live(index)?;
        let (head, tail) = (self.head, self.tail);
        self.slots[slot].as_mut().ok_or(WindowError::IndexOutOfRange { index: index.0, head, tail })
    }

    /// Overwrites the live element at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::IndexOutOfRange`] unless `head <= index < tail`.
    pub fn update_at(&mut self, index: WindowIndex, item: T) -> Result<T> {
        let current = self.read_at_mut(index)?;
        Ok(std::mem::replace(current, item))
    }

    /// Returns true if `index` is the most recently pushed element.
    #[inline]
    #[must_use]
    pub fn is_last(&self, index: WindowIndex) -> bool {
        self.tail > 0 && index.0 == self.tail - 1
    }

    /// Number of live elements.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn len(&self) -> usize {
        // bounded by capacity, which is a usize
        (self.tail - self.head) as usize
    }

    /// Returns true if there are no live elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if the next push would fail with [`WindowError::BufferFull`].
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Maximum number of live elements.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Total number of elements ever pushed (the tail index).
    #[inline]
    #[must_use]
    pub fn pushed_count(&self) -> u64 {
        self.tail
    }

    /// Total number of elements ever popped (the head index).
    #[inline]
    #[must_use]
    pub fn popped_count(&self) -> u64 {
        self.head
    }

    /// Logical index of the oldest live element, or of the next push when empty.
    #[inline]
    #[must_use]
    pub fn head_index(&self) -> WindowIndex {
        WindowIndex(self.head)
    }

    /// Logical index the next push will receive.
    #[inline]
    #[must_use]
    pub fn tail_index(&self) -> WindowIndex {
        WindowIndex(self.tail)
    }

    /// Iterates live elements from oldest to newest along with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (WindowIndex, &T)> + '_ {
        (self.head..self.tail).filter_map(move |i| {
            self.slots[self.slot(i)].as_ref().map(|item| (WindowIndex(i), item))
        })
    }

    /// Moves the live elements into a new slot array of `capacity` slots.
    ///
    /// Head and tail are preserved, so every live [`WindowIndex`] stays valid.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::CapacityTooSmall`] (leaving the buffer untouched) if
    /// `capacity < len()`.
    pub fn grow(&mut self, capacity: usize) -> Result<()> {
        let live = self.len();
        if capacity < live {
            return Err(WindowError::CapacityTooSmall { requested: capacity, live });
        }
        let mut slots = empty_slots(capacity);
        for i in self.head..self.tail {
            let from = self.slot(i);
            #[allow(clippy::cast_possible_truncation)]
            let to = (i % capacity as u64) as usize;
            slots[to] = self.slots[from].take();
        }
        debug!("Resized window from {} to {capacity} slots ({live} live)", self.slots.len());
        self.slots = slots;
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularBuffer")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("live", &self.iter().map(|(_, item)| item).collect::<Vec<_>>())
            .finish()
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::VecDeque;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer: CircularBuffer<u32> = CircularBuffer::new(3);
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.pushed_count(), 0);
        assert_eq!(buffer.popped_count(), 0);
        assert_eq!(buffer.front(), Err(WindowError::BufferEmpty));
        assert_eq!(buffer.back(), Err(WindowError::BufferEmpty));
        assert!(!buffer.is_last(WindowIndex::new(0)));
    }

    #[test]
    fn test_fifo_order_across_wraparound() {
        let mut buffer = CircularBuffer::new(4);
        buffer.push(1).unwrap();
        buffer.push(2).unwrap();
        assert_eq!(buffer.pop_front(), Ok(1));
        assert_eq!(buffer.pop_front(), Ok(2));

        for value in [2, 1, 0, 3] {
            buffer.push(value).unwrap();
        }
        assert!(buffer.is_full());

        let mut fronts = Vec::new();
        while !buffer.is_empty() {
            fronts.push(*buffer.front().unwrap());
            buffer.pop_front().unwrap();
        }
        assert_eq!(fronts, vec![2, 1, 0, 3]);
        assert_eq!(buffer.pushed_count(), 6);
        assert_eq!(buffer.popped_count(), 6);
    }

    #[test]
    fn test_push_full_leaves_state_unchanged() {
        let mut buffer = CircularBuffer::new(2);
        buffer.push('a').unwrap();
        buffer.push('b').unwrap();
        assert_eq!(buffer.push('c'), Err(WindowError::BufferFull { capacity: 2 }));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.pushed_count(), 2);
        assert_eq!(buffer.back(), Ok(&'b'));
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut buffer: CircularBuffer<u8> = CircularBuffer::new(2);
        assert_eq!(buffer.pop_front(), Err(WindowError::BufferEmpty));
        assert_eq!(buffer.popped_count(), 0);
    }

    #[test]
    fn test_zero_capacity_rejects_push() {
        let mut buffer = CircularBuffer::new(0);
        assert!(buffer.is_full());
        assert_eq!(buffer.push(1), Err(WindowError::BufferFull { capacity: 0 }));
        assert!(buffer.read_at(WindowIndex::new(0)).is_err());
    }

    #[test]
    fn test_indices_are_stable_across_wraparound() {
        let mut buffer = CircularBuffer::new(3);
        let mut indices = Vec::new();
        for value in 0..3 {
            indices.push(buffer.push(value * 10).unwrap());
        }
        buffer.pop_front().unwrap();
        let wrapped = buffer.push(30).unwrap();

        assert_eq!(wrapped, WindowIndex::new(3));
        assert_eq!(buffer.read_at(indices[1]), Ok(&10));
        assert_eq!(buffer.read_at(indices[2]), Ok(&20));
        assert_eq!(buffer.read_at(wrapped), Ok(&30));
        assert!(buffer.is_last(wrapped));
        assert!(!buffer.is_last(indices[2]));
    }

    #[rstest]
    #[case(0, "popped index")]
    #[case(3, "tail index")]
    #[case(4, "beyond tail")]
    fn test_read_out_of_range(#[case] index: u64, #[case] description: &str) {
        let mut buffer = CircularBuffer::new(4);
        for value in 0..3 {
            buffer.push(value).unwrap();
        }
        buffer.pop_front().unwrap();

        let err = buffer.read_at(WindowIndex::new(index)).unwrap_err();
        assert_eq!(
            err,
            WindowError::IndexOutOfRange { index, head: 1, tail: 3 },
            "Failed for: {description}"
        );
        assert!(buffer.update_at(WindowIndex::new(index), 99).is_err(), "Failed for: {description}");
        assert_eq!(buffer.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_update_in_place() {
        let mut buffer = CircularBuffer::new(2);
        let first = buffer.push(String::from("r1")).unwrap();
        buffer.push(String::from("r2")).unwrap();

        let previous = buffer.update_at(first, String::from("r1*")).unwrap();
        assert_eq!(previous, "r1");
        buffer.read_at_mut(first).unwrap().push('!');
        assert_eq!(buffer.pop_front().unwrap(), "r1*!");
    }

    #[test]
    fn test_grow_preserves_indices() {
        let mut buffer = CircularBuffer::new(3);
        for value in 0..3 {
            buffer.push(value).unwrap();
        }
        buffer.pop_front().unwrap();
        buffer.push(3).unwrap();
        assert!(buffer.is_full());

        buffer.grow(5).unwrap();
        assert_eq!(buffer.capacity(), 5);
        assert!(!buffer.is_full());
        for i in 1..4u64 {
            assert_eq!(buffer.read_at(WindowIndex::new(i)), Ok(&(i as i32)));
        }
        assert_eq!(buffer.push(4), Ok(WindowIndex::new(4)));
        assert_eq!(buffer.push(5), Ok(WindowIndex::new(5)));
        assert!(buffer.is_full());
        let drained: Vec<_> = std::iter::from_fn(|| buffer.pop_front().ok()).collect();
        assert_eq!(drained, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_grow_rejects_shrinking_below_live() {
        let mut buffer = CircularBuffer::new(4);
        for value in 0..3 {
            buffer.push(value).unwrap();
        }
        assert_eq!(buffer.grow(2), Err(WindowError::CapacityTooSmall { requested: 2, live: 3 }));
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.front(), Ok(&0));
    }

    #[test]
    fn test_index_overflow_is_checked() {
        let mut buffer = CircularBuffer::new(2);
        buffer.head = u64::MAX;
        buffer.tail = u64::MAX;
        assert_eq!(buffer.push(1), Err(WindowError::IndexOverflow));
        assert!(buffer.is_empty());
        assert!(WindowError::IndexOverflow.is_fatal());
    }

    #[test]
    fn test_window_index_next_saturates() {
        assert_eq!(WindowIndex::new(7).next(), WindowIndex::new(8));
        assert_eq!(WindowIndex::new(u64::MAX).next(), WindowIndex::new(u64::MAX));
        assert_eq!(WindowIndex::new(12).to_string(), "12");
    }

    // ========================================================================
    // Property-Based Tests
    // ========================================================================

    proptest! {
        /// Property: the buffer behaves like a bounded VecDeque, and every live index reads back
        #[test]
        fn prop_matches_bounded_deque(
            capacity in 1..8usize,
            ops in prop::collection::vec(any::<Option<u16>>(), 0..100),
        ) {
            let mut buffer = CircularBuffer::new(capacity);
            let mut reference: VecDeque<(WindowIndex, u16)> = VecDeque::new();

            for op in ops {
                match op {
                    Some(value) => match buffer.push(value) {
                        Ok(index) => {
                            prop_assert!(reference.len() < capacity);
                            reference.push_back((index, value));
                        }
                        Err(e) => {
                            prop_assert_eq!(e, WindowError::BufferFull { capacity });
                            prop_assert_eq!(reference.len(), capacity);
                        }
                    },
                    None => match buffer.pop_front() {
                        Ok(value) => prop_assert_eq!(Some(value), reference.pop_front().map(|(_, v)| v)),
                        Err(e) => {
                            prop_assert_eq!(e, WindowError::BufferEmpty);
                            prop_assert!(reference.is_empty());
                        }
                    },
                }

                prop_assert!(buffer.len() <= capacity);
                prop_assert_eq!(buffer.len() as u64, buffer.pushed_count() - buffer.popped_count());
                prop_assert_eq!(buffer.len(), reference.len());
                prop_assert_eq!(buffer.is_full(), buffer.len() == capacity);
                for (index, value) in &reference {
                    prop_assert_eq!(buffer.read_at(*index), Ok(value));
                }
                if let Some((index, _)) = reference.back() {
                    prop_assert!(buffer.is_last(*index));
                }
            }
        }
    }
}

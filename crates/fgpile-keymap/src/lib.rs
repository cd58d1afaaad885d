#![deny(unsafe_code)]

//! Compact key-indexed maps over small, finite key domains.
//!
//! A [`CompactKeyMap`] stores one value slot per possible key, indexed by the dense integer
//! code a [`KeyDomain`] assigns to each key. Storage is allocated once at construction, so
//! per-base or per-flag bookkeeping inside a hot loop never touches the allocator.
//!
//! How presence is tracked is chosen through a [`Presence`] strategy:
//! - [`BitsetPresence`] (default) - a bit per key, works for any value type
//! - [`SentinelPresence`] - a designated value means "absent"
//! - [`AlwaysPresent`] - every key always has a value, `remove` resets it to a default
//!
//! # Example
//!
//! ```
//! use fgpile_keymap::{CompactKeyMap, KeyCounts};
//!
//! let mut seen: CompactKeyMap<bool, &str> = CompactKeyMap::new();
//! seen.set(true, "yes");
//! assert!(seen.contains(true));
//! assert!(!seen.contains(false));
//! assert_eq!(seen.len(), 1);
//!
//! let mut counts: KeyCounts<u8> = KeyCounts::new_counts();
//! for byte in b"ACGTA" {
//!     counts.increment(*byte);
//! }
//! assert_eq!(counts.count(b'A'), 2);
//! assert_eq!(counts.total(), 5);
//! ```

pub mod presence;

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use thiserror::Error;

pub use presence::{AlwaysPresent, BitsetPresence, Presence, SentinelPresence};

/// Result type alias for key map operations.
pub type Result<T> = std::result::Result<T, KeyMapError>;

/// Errors raised by [`CompactKeyMap`] lookups.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMapError {
    /// The key has no value under the map's presence strategy.
    #[error("No value present for key with code {code}")]
    KeyNotPresent {
        /// Dense code of the requested key
        code: usize,
    },
}

/// A finite, enumerable key type with a dense integer encoding.
///
/// Implementations must map every value injectively into `0..SIZE` via [`code`](Self::code),
/// and [`from_code`](Self::from_code) must invert that mapping for every code in range.
pub trait KeyDomain: Copy {
    /// Number of distinct keys in the domain.
    const SIZE: usize;

    /// Dense code of this key, in `0..SIZE`.
    fn code(self) -> usize;

    /// The key with the given code. Only called with codes in `0..SIZE`.
    fn from_code(code: usize) -> Self;
}

impl KeyDomain for bool {
    const SIZE: usize = 2;

    #[inline]
    fn code(self) -> usize {
        usize::from(self)
    }

    #[inline]
    fn from_code(code: usize) -> Self {
        code != 0
    }
}

impl KeyDomain for u8 {
    const SIZE: usize = 256;

    #[inline]
    fn code(self) -> usize {
        usize::from(self)
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_code(code: usize) -> Self {
        debug_assert!(code < Self::SIZE, "code {code} out of range for u8");
        code as u8
    }
}

/// Fixed-size map from a [`KeyDomain`] to values, with pluggable presence tracking.
///
/// All operations except iteration are O(1). Iteration visits codes `0..K::SIZE` and yields
/// present entries in ascending code order.
#[derive(Clone)]
pub struct CompactKeyMap<K, V, P = BitsetPresence> {
    /// One slot per key code.
    values: Box<[V]>,
    /// Presence strategy and its auxiliary state.
    presence: P,
    /// Number of codes for which the strategy reports presence.
    len: usize,
    _key: PhantomData<K>,
}

impl<K: KeyDomain, V: Default + Clone> CompactKeyMap<K, V, BitsetPresence> {
    /// Creates an empty map that tracks presence with a bit vector.
    #[must_use]
    pub fn new() -> Self {
        Self::with_presence(BitsetPresence::default())
    }
}

impl<K: KeyDomain, V: Default + Clone> Default for CompactKeyMap<K, V, BitsetPresence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyDomain, V: PartialEq + Clone> CompactKeyMap<K, V, SentinelPresence<V>> {
    /// Creates an empty map in which slots equal to `sentinel` are absent.
    #[must_use]
    pub fn with_sentinel(sentinel: V) -> Self {
        Self::with_presence(SentinelPresence::new(sentinel))
    }
}

impl<K: KeyDomain, V: Clone> CompactKeyMap<K, V, AlwaysPresent<V>> {
    /// Creates a fully populated map with every key set to `default`.
    #[must_use]
    pub fn always_present(default: V) -> Self {
        Self::with_presence(AlwaysPresent::new(default))
    }
}

impl<K: KeyDomain, V: Clone, P: Presence<V>> CompactKeyMap<K, V, P> {
    /// Creates a map using the given presence strategy.
    ///
    /// Allocates the `K::SIZE` value slots once; no later operation reallocates.
    #[must_use]
    pub fn with_presence(mut presence: P) -> Self {
        let fill = presence.init(K::SIZE);
        let values = vec![fill; K::SIZE].into_boxed_slice();
        let len = values.iter().enumerate().filter(|(code, v)| presence.has(*code, v)).count();
        Self { values, presence, len, _key: PhantomData }
    }
}

impl<K: KeyDomain, V, P: Presence<V>> CompactKeyMap<K, V, P> {
    #[inline]
    fn code_of(key: K) -> usize {
        let code = key.code();
        debug_assert!(code < K::SIZE, "key code {code} outside domain of size {}", K::SIZE);
        code
    }

    #[inline]
    fn present_at(&self, code: usize) -> bool {
        self.presence.has(code, &self.values[code])
    }

    #[inline]
    fn track(&mut self, was: bool, now: bool) {
        match (was, now) {
            (false, true) => self.len += 1,
            (true, false) => self.len -= 1,
            _ => {}
        }
    }

    /// Stores `value` for `key`, replacing any previous value.
    ///
    /// Under [`SentinelPresence`], storing the sentinel leaves the key absent.
    pub fn set(&mut self, key: K, value: V) {
        let code = Self::code_of(key);
        let was = self.present_at(code);
        self.values[code] = value;
        self.presence.on_insert(code);
        let now = self.present_at(code);
        self.track(was, now);
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyMapError::KeyNotPresent`] if the key has no value.
    pub fn get(&self, key: K) -> Result<&V> {
        let code = Self::code_of(key);
        if self.present_at(code) {
            Ok(&self.values[code])
        } else {
            Err(KeyMapError::KeyNotPresent { code })
        }
    }

    /// Mutates the value stored for a present `key` in place.
    ///
    /// Presence is re-evaluated afterward, so writing the sentinel through `f` removes the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyMapError::KeyNotPresent`] (and does not call `f`) if the key has no value.
    pub fn update<F: FnOnce(&mut V)>(&mut self, key: K, f: F) -> Result<()> {
        let code = Self::code_of(key);
        if !self.present_at(code) {
            return Err(KeyMapError::KeyNotPresent { code });
        }
        f(&mut self.values[code]);
        let now = self.present_at(code);
        self.track(true, now);
        Ok(())
    }

    /// Returns true if `key` currently has a value.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.present_at(Self::code_of(key))
    }

    /// Removes `key`, returning true iff it was present.
    ///
    /// Under [`AlwaysPresent`] the value is reset to the default and the key stays present.
    pub fn remove(&mut self, key: K) -> bool {
        let code = Self::code_of(key);
        if !self.present_at(code) {
            return false;
        }
        self.presence.on_remove(code, &mut self.values[code]);
        let now = self.present_at(code);
        self.track(true, now);
        true
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        for code in 0..K::SIZE {
            self.remove(K::from_code(code));
        }
    }

    /// Number of keys that currently have a value.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no key has a value.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the key domain.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        K::SIZE
    }

    /// The presence strategy backing this map.
    #[must_use]
    pub fn presence(&self) -> &P {
        &self.presence
    }

    /// Iterates present `(key, value)` pairs in ascending code order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter { map: self, next_code: 0 }
    }

    /// Iterates present keys in ascending code order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys { inner: self.iter() }
    }

    /// Iterates values of present keys in ascending code order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        Values { inner: self.iter() }
    }
}

impl<K: KeyDomain + fmt::Debug, V: fmt::Debug, P: Presence<V>> fmt::Debug
    for CompactKeyMap<K, V, P>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: KeyDomain, V, P: Presence<V>> IntoIterator for &'a CompactKeyMap<K, V, P> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over present `(key, value)` pairs of a [`CompactKeyMap`].
pub struct Iter<'a, K, V, P> {
    map: &'a CompactKeyMap<K, V, P>,
    next_code: usize,
}

impl<K, V, P> Clone for Iter<'_, K, V, P> {
    fn clone(&self) -> Self {
        Self { map: self.map, next_code: self.next_code }
    }
}

impl<'a, K: KeyDomain, V, P: Presence<V>> Iterator for Iter<'a, K, V, P> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_code < K::SIZE {
            let code = self.next_code;
            self.next_code += 1;
            if self.map.present_at(code) {
                return Some((K::from_code(code), &self.map.values[code]));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(K::SIZE - self.next_code))
    }
}

impl<K: KeyDomain, V, P: Presence<V>> FusedIterator for Iter<'_, K, V, P> {}

/// Iterator over present keys of a [`CompactKeyMap`].
pub struct Keys<'a, K, V, P> {
    inner: Iter<'a, K, V, P>,
}

impl<K, V, P> Clone for Keys<'_, K, V, P> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K: KeyDomain, V, P: Presence<V>> Iterator for Keys<'_, K, V, P> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Iterator over values of present keys of a [`CompactKeyMap`].
pub struct Values<'a, K, V, P> {
    inner: Iter<'a, K, V, P>,
}

impl<K, V, P> Clone for Values<'_, K, V, P> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<'a, K: KeyDomain, V, P: Presence<V>> Iterator for Values<'a, K, V, P> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// Per-key counters: every key present, starting at zero.
pub type KeyCounts<K> = CompactKeyMap<K, u64, AlwaysPresent<u64>>;

impl<K: KeyDomain> CompactKeyMap<K, u64, AlwaysPresent<u64>> {
    /// Creates a counter map with every key at zero.
    #[must_use]
    pub fn new_counts() -> Self {
        Self::always_present(0)
    }

    /// Adds one to the count for `key`.
    #[inline]
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Adds `n` to the count for `key`.
    #[inline]
    pub fn add(&mut self, key: K, n: u64) {
        self.values[Self::code_of(key)] += n;
    }

    /// Current count for `key`.
    #[inline]
    #[must_use]
    pub fn count(&self, key: K) -> u64 {
        self.values[Self::code_of(key)]
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Adds every count from `other` into this map.
    pub fn merge(&mut self, other: &Self) {
        for (slot, n) in self.values.iter_mut().zip(other.values.iter()) {
            *slot += n;
        }
    }
}

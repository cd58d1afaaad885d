//! Presence-tracking strategies for [`CompactKeyMap`](crate::CompactKeyMap).
//!
//! A strategy decides what "this key currently has a value" means. All strategies share the
//! same storage layout underneath (one value slot per key code) and differ only in the
//! auxiliary state they keep:
//!
//! | Strategy | Extra memory | Value requirements | `remove` |
//! |---|---|---|---|
//! | [`BitsetPresence`] | N/8 bytes | `Default + Clone` | clears the bit |
//! | [`SentinelPresence`] | one value | `PartialEq + Clone` | writes the sentinel |
//! | [`AlwaysPresent`] | one value | `Clone` | writes the default, key stays present |

/// Capability interface a presence strategy provides to the map.
///
/// The map calls [`init`](Presence::init) once at construction, then [`has`](Presence::has)
/// before and after every mutation to keep its size counter exact.
pub trait Presence<V> {
    /// Prepares strategy state for `size` key codes and returns the value each slot starts with.
    fn init(&mut self, size: usize) -> V;

    /// Returns true if the slot for `code`, currently holding `value`, counts as present.
    fn has(&self, code: usize, value: &V) -> bool;

    /// Called after a value has been stored at `code`.
    fn on_insert(&mut self, code: usize);

    /// Called to remove the entry at `code`; `slot` is the stored value.
    fn on_remove(&mut self, code: usize, slot: &mut V);
}

const WORD_BITS: usize = u64::BITS as usize;

/// Tracks presence in a bit vector, independent of the stored value.
///
/// Works for any value type, including ones without a meaningful "absent" value.
#[derive(Debug, Clone, Default)]
pub struct BitsetPresence {
    words: Vec<u64>,
}

impl BitsetPresence {
    #[inline]
    fn locate(code: usize) -> (usize, u64) {
        (code / WORD_BITS, 1u64 << (code % WORD_BITS))
    }
}

impl<V: Default> Presence<V> for BitsetPresence {
    fn init(&mut self, size: usize) -> V {
        self.words = vec![0; size.div_ceil(WORD_BITS)];
        V::default()
    }

    #[inline]
    fn has(&self, code: usize, _value: &V) -> bool {
        let (word, mask) = Self::locate(code);
        self.words[word] & mask != 0
    }

    #[inline]
    fn on_insert(&mut self, code: usize) {
        let (word, mask) = Self::locate(code);
        self.words[word] |= mask;
    }

    #[inline]
    fn on_remove(&mut self, code: usize, slot: &mut V) {
        let (word, mask) = Self::locate(code);
        self.words[word] &= !mask;
        *slot = V::default();
    }
}

/// Treats a caller-supplied sentinel value as "absent".
///
/// Saves the bit vector at the cost of an equality comparison per query. Storing a value
/// equal to the sentinel makes the key indistinguishable from an absent one.
#[derive(Debug, Clone)]
pub struct SentinelPresence<V> {
    sentinel: V,
}

impl<V> SentinelPresence<V> {
    /// Creates a strategy that treats `sentinel` as the absent marker.
    #[must_use]
    pub fn new(sentinel: V) -> Self {
        Self { sentinel }
    }

    /// The value that marks a slot as absent.
    #[must_use]
    pub fn sentinel(&self) -> &V {
        &self.sentinel
    }
}

impl<V: PartialEq + Clone> Presence<V> for SentinelPresence<V> {
    fn init(&mut self, _size: usize) -> V {
        self.sentinel.clone()
    }

    #[inline]
    fn has(&self, _code: usize, value: &V) -> bool {
        *value != self.sentinel
    }

    #[inline]
    fn on_insert(&mut self, _code: usize) {}

    #[inline]
    fn on_remove(&mut self, _code: usize, slot: &mut V) {
        *slot = self.sentinel.clone();
    }
}

/// Every key is present from construction onward.
///
/// Removing a key resets its value to the configured default; the key stays present.
/// Suited to counters over a fully enumerated domain.
#[derive(Debug, Clone)]
pub struct AlwaysPresent<V> {
    default: V,
}

impl<V> AlwaysPresent<V> {
    /// Creates a strategy whose slots start at, and reset to, `default`.
    #[must_use]
    pub fn new(default: V) -> Self {
        Self { default }
    }

    /// The value every slot starts with and is reset to on removal.
    #[must_use]
    pub fn default_value(&self) -> &V {
        &self.default
    }
}

impl<V: Clone> Presence<V> for AlwaysPresent<V> {
    fn init(&mut self, _size: usize) -> V {
        self.default.clone()
    }

    #[inline]
    fn has(&self, _code: usize, _value: &V) -> bool {
        true
    }

    #[inline]
    fn on_insert(&mut self, _code: usize) {}

    #[inline]
    fn on_remove(&mut self, _code: usize, slot: &mut V) {
        *slot = self.default.clone();
    }
}

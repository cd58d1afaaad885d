//! The nucleotide alphabet as a dense key domain.
//!
//! # Example
//!
//! ```
//! use fgpile_dna::Base;
//! use fgpile_keymap::KeyCounts;
//!
//! let mut counts: KeyCounts<Base> = KeyCounts::new_counts();
//! for &byte in b"ACGTNacgx" {
//!     counts.increment(Base::from_ascii(byte));
//! }
//! assert_eq!(counts.count(Base::A), 2);
//! assert_eq!(counts.count(Base::N), 2);
//! ```

use std::fmt;

use fgpile_keymap::KeyDomain;

use crate::NO_CALL_BASE;

/// A called or no-call nucleotide.
///
/// Codes follow the usual 2-bit order (A=0, C=1, G=2, T=3) with N last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    /// Adenine
    A,
    /// Cytosine
    C,
    /// Guanine
    G,
    /// Thymine
    T,
    /// No-call
    N,
}

impl Base {
    /// All bases in code order.
    pub const ALL: [Base; 5] = [Base::A, Base::C, Base::G, Base::T, Base::N];

    /// The four called bases in code order.
    pub const CALLED: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// Parses an ASCII base, case-insensitively. Anything other than A/C/G/T is a no-call.
    #[inline]
    #[must_use]
    pub const fn from_ascii(byte: u8) -> Self {
        match byte {
            b'A' | b'a' => Base::A,
            b'C' | b'c' => Base::C,
            b'G' | b'g' => Base::G,
            b'T' | b't' => Base::T,
            _ => Base::N,
        }
    }

    /// Uppercase ASCII representation.
    #[inline]
    #[must_use]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
            Base::N => NO_CALL_BASE,
        }
    }

    /// Returns true for A, C, G and T.
    #[inline]
    #[must_use]
    pub const fn is_called(self) -> bool {
        !matches!(self, Base::N)
    }
}

impl KeyDomain for Base {
    const SIZE: usize = 5;

    #[inline]
    fn code(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_code(code: usize) -> Self {
        Self::ALL[code]
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.to_ascii()))
    }
}

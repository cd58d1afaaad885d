//! SAM flag bits as a key domain.
//!
//! [`SamFlag`] enumerates the twelve SAM FLAG bits so per-flag tallies can be kept in a
//! [`FlagCounts`] map instead of twelve hand-maintained counters.
//!
//! # Example
//!
//! ```
//! use fgpile_lib::flags::{FlagCounts, SamFlag, tally_flags};
//!
//! let mut counts = FlagCounts::new_counts();
//! tally_flags(&mut counts, 0x10 | 0x400);
//! tally_flags(&mut counts, 0x10);
//! assert_eq!(counts.count(SamFlag::Reverse), 2);
//! assert_eq!(counts.count(SamFlag::Duplicate), 1);
//! ```

use std::fmt;

use fgpile_keymap::{KeyCounts, KeyDomain};

/// Duplicate flag bit in SAM flags (0x400)
pub const DUPLICATE_FLAG: u16 = 0x400;

/// Reverse-strand flag bit in SAM flags (0x10)
pub const REVERSE_FLAG: u16 = 0x10;

/// One bit of the SAM FLAG field; the code is the bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SamFlag {
    /// 0x1: template has multiple segments
    Paired,
    /// 0x2: each segment properly aligned
    ProperPair,
    /// 0x4: segment unmapped
    Unmapped,
    /// 0x8: next segment unmapped
    MateUnmapped,
    /// 0x10: sequence reverse complemented
    Reverse,
    /// 0x20: next segment reverse complemented
    MateReverse,
    /// 0x40: first segment in the template
    FirstOfPair,
    /// 0x80: last segment in the template
    SecondOfPair,
    /// 0x100: secondary alignment
    Secondary,
    /// 0x200: not passing quality controls
    QcFail,
    /// 0x400: PCR or optical duplicate
    Duplicate,
    /// 0x800: supplementary alignment
    Supplementary,
}

impl SamFlag {
    /// All flags in bit order.
    pub const ALL: [SamFlag; 12] = [
        SamFlag::Paired,
        SamFlag::ProperPair,
        SamFlag::Unmapped,
        SamFlag::MateUnmapped,
        SamFlag::Reverse,
        SamFlag::MateReverse,
        SamFlag::FirstOfPair,
        SamFlag::SecondOfPair,
        SamFlag::Secondary,
        SamFlag::QcFail,
        SamFlag::Duplicate,
        SamFlag::Supplementary,
    ];

    /// The bit this flag occupies.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Returns true if this flag is set in `flags`.
    #[must_use]
    pub const fn is_set(self, flags: u16) -> bool {
        flags & self.bit() != 0
    }

    /// Short name used in summaries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SamFlag::Paired => "paired",
            SamFlag::ProperPair => "proper_pair",
            SamFlag::Unmapped => "unmapped",
            SamFlag::MateUnmapped => "mate_unmapped",
            SamFlag::Reverse => "reverse",
            SamFlag::MateReverse => "mate_reverse",
            SamFlag::FirstOfPair => "first_of_pair",
            SamFlag::SecondOfPair => "second_of_pair",
            SamFlag::Secondary => "secondary",
            SamFlag::QcFail => "qc_fail",
            SamFlag::Duplicate => "duplicate",
            SamFlag::Supplementary => "supplementary",
        }
    }
}

impl KeyDomain for SamFlag {
    const SIZE: usize = 12;

    #[inline]
    fn code(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_code(code: usize) -> Self {
        Self::ALL[code]
    }
}

impl fmt::Display for SamFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-flag record counts.
pub type FlagCounts = KeyCounts<SamFlag>;

/// Counts every flag set in `flags`.
pub fn tally_flags(counts: &mut FlagCounts, flags: u16) {
    for flag in SamFlag::ALL {
        if flag.is_set(flags) {
            counts.increment(flag);
        }
    }
}

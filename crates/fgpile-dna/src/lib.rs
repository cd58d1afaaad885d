#![deny(unsafe_code)]

//! Nucleotide types for per-base bookkeeping.
//!
//! This crate provides:
//! - [`Base`], the five-symbol nucleotide alphabet (A, C, G, T, N) as a
//!   [`KeyDomain`](fgpile_keymap::KeyDomain), so per-base counters can live in a
//!   [`CompactKeyMap`](fgpile_keymap::CompactKeyMap) without hashing
//! - Common constants for no-call handling

pub mod base;

pub use base::Base;

/// No-call base character.
pub const NO_CALL_BASE: u8 = b'N';

/// Lowercase no-call base character.
pub const NO_CALL_BASE_LOWER: u8 = b'n';

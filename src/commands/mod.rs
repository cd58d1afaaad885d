//! CLI command implementations for fgpile.
//!
//! ## Utilities
//! - [`simulate`] - run the streaming scans over simulated reads

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod simulate;

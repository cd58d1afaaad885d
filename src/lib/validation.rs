//! Input validation utilities
//!
//! Common validation functions for command-line parameters with consistent error messages.
//! All functions return structured errors from [`crate::errors`].

use crate::errors::{FgpileError, Result};
use std::fmt::Display;

/// Validate that `min <= max` for a pair of related parameters.
///
/// # Example
/// ```
/// use fgpile_lib::validation::validate_min_max;
///
/// assert!(validate_min_max(16, 1024, "initial-window", "max-window").is_ok());
/// assert!(validate_min_max(2048, 1024, "initial-window", "max-window").is_err());
/// ```
pub fn validate_min_max<T: Ord + Display>(
    min: T,
    max: T,
    min_name: &str,
    max_name: &str,
) -> Result<()> {
    if min > max {
        return Err(FgpileError::InvalidParameter {
            parameter: min_name.to_string(),
            reason: format!("{min_name} ({min}) must be <= {max_name} ({max})"),
        });
    }
    Ok(())
}

/// Validate that a value is strictly positive.
///
/// # Example
/// ```
/// use fgpile_lib::validation::validate_positive;
///
/// assert!(validate_positive(5usize, "read-length").is_ok());
/// assert!(validate_positive(0usize, "read-length").is_err());
/// ```
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(FgpileError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("must be > 0, got {value}"),
        });
    }
    Ok(())
}

/// Validate that a fraction lies in `[0, 1]`.
///
/// # Example
/// ```
/// use fgpile_lib::validation::validate_fraction;
///
/// assert!(validate_fraction(0.01, "error-rate").is_ok());
/// assert!(validate_fraction(1.5, "error-rate").is_err());
/// ```
pub fn validate_fraction(value: f64, name: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(FgpileError::InvalidFraction { parameter: name.to_string(), value });
    }
    Ok(())
}

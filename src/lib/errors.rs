//! Custom error types for fgpile operations.

use fgpile_keymap::KeyMapError;
use fgpile_window::WindowError;
use thiserror::Error;

/// Result type alias for fgpile operations
pub type Result<T> = std::result::Result<T, FgpileError>;

/// Error type for fgpile operations
#[derive(Error, Debug)]
pub enum FgpileError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Invalid fraction or rate
    #[error("Invalid fraction for '{parameter}': {value} (must be between 0 and 1)")]
    InvalidFraction {
        /// The parameter name
        parameter: String,
        /// The invalid value
        value: f64,
    },

    /// Records arrived out of coordinate order
    #[error("Record {record_number} is out of order: {found} follows {previous}")]
    UnsortedInput {
        /// 1-based number of the offending record
        record_number: u64,
        /// Coordinate of the offending record
        found: String,
        /// Coordinate of the record before it
        previous: String,
    },

    /// The window needed to grow past its configured maximum
    #[error("Window exceeded its maximum of {max_capacity} records; raise --max-window")]
    WindowExhausted {
        /// Configured maximum capacity
        max_capacity: usize,
    },

    /// A window operation failed
    #[error(transparent)]
    Window(#[from] WindowError),

    /// A key map lookup failed
    #[error(transparent)]
    KeyMap(#[from] KeyMapError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter() {
        let error = FgpileError::InvalidParameter {
            parameter: "read-length".to_string(),
            reason: "must be > 0".to_string(),
        };
        let msg = format!("{error}");
        assert!(msg.contains("Invalid parameter 'read-length'"));
        assert!(msg.contains("must be > 0"));
    }

    #[test]
    fn test_invalid_fraction() {
        let error = FgpileError::InvalidFraction { parameter: "error-rate".to_string(), value: 1.5 };
        let msg = format!("{error}");
        assert!(msg.contains("1.5"));
        assert!(msg.contains("between 0 and 1"));
    }

    #[test]
    fn test_unsorted_input() {
        let error = FgpileError::UnsortedInput {
            record_number: 12,
            found: "(0, 5)".to_string(),
            previous: "(0, 9)".to_string(),
        };
        assert_eq!(error.to_string(), "Record 12 is out of order: (0, 5) follows (0, 9)");
    }

    #[test]
    fn test_window_errors_convert() {
        let error: FgpileError = WindowError::BufferEmpty.into();
        assert!(matches!(error, FgpileError::Window(WindowError::BufferEmpty)));
        assert_eq!(error.to_string(), "Window is empty");

        let error: FgpileError = KeyMapError::KeyNotPresent { code: 3 }.into();
        assert!(error.to_string().contains("code 3"));
    }
}

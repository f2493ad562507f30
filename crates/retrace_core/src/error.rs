//! Core error types for RETRACE.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Observed value registered without a usable key
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },

    /// Action id is not present in the log
    UnknownAction {
        /// Offending id
        id: u64,
    },

    /// Index outside the active window
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Window length
        len: usize,
    },

    /// Validation error
    Validation {
        /// Field that failed
        field: String,
        /// Failure reason
        reason: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey { reason } => write!(f, "Invalid observed key: {}", reason),
            Self::UnknownAction { id } => write!(f, "Action not found: #{}", id),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for window of {}", index, len)
            }
            Self::Validation { field, reason } => {
                write!(f, "Validation failed for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::UnknownAction { id: 7 };
        assert_eq!(format!("{}", err), "Action not found: #7");

        let err = CoreError::InvalidKey {
            reason: "key is empty".to_string(),
        };
        assert_eq!(format!("{}", err), "Invalid observed key: key is empty");
    }

    #[test]
    fn test_index_out_of_range_error() {
        let err = CoreError::IndexOutOfRange { index: 5, len: 2 };
        let s = format!("{}", err);
        assert!(s.contains('5'));
        assert!(s.contains('2'));
    }

    #[test]
    fn test_validation_display() {
        let err = CoreError::Validation {
            field: "cursor".to_string(),
            reason: "past the end".to_string(),
        };
        assert_eq!(err.to_string(), "Validation failed for cursor: past the end");
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::UnknownAction { id: 1 };
        let err2 = CoreError::UnknownAction { id: 1 };
        assert_eq!(err1, err2);
        assert_ne!(err1, CoreError::UnknownAction { id: 2 });
    }
}

//! Monitor errors.

use retrace_core::{CoreError, ObservedKey};

/// Monitor result type
pub type MonitorResult<T> = Result<T, MonitorError>;

/// A snapshot read failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("read of {key} failed: {reason}")]
pub struct AccessError {
    /// Key being read
    pub key: ObservedKey,
    /// Host-provided reason
    pub reason: String,
}

impl AccessError {
    /// Create an access error
    #[must_use]
    pub fn new(key: ObservedKey, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}

/// Monitor errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    /// A value accessor failed; the transaction was not recorded
    #[error("accessor failure: {0}")]
    Access(#[from] AccessError),

    /// A value accessor did not answer in time; the transaction was not recorded
    #[error("read of {key} timed out after {timeout_ms}ms")]
    Timeout {
        /// Key being read
        key: ObservedKey,
        /// Configured limit
        timeout_ms: u64,
    },

    /// The session task has stopped
    #[error("monitor session closed")]
    SessionClosed,

    /// The subscriber unsubscribed
    #[error("subscription cancelled")]
    Unsubscribed,

    /// Malformed script
    #[error("invalid script: {0}")]
    Script(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_message() {
        let err = AccessError::new(ObservedKey::new("todos").unwrap(), "selector threw");
        assert_eq!(err.to_string(), "read of todos failed: selector threw");

        let wrapped = MonitorError::from(err);
        assert!(wrapped.to_string().starts_with("accessor failure"));
    }

    #[test]
    fn test_timeout_message() {
        let err = MonitorError::Timeout {
            key: ObservedKey::new("slow").unwrap(),
            timeout_ms: 50,
        };
        assert!(err.to_string().contains("50ms"));
    }

    #[test]
    fn test_core_error_transparent() {
        let err = MonitorError::from(CoreError::UnknownAction { id: 3 });
        assert_eq!(err.to_string(), "Action not found: #3");
    }
}

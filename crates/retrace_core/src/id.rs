//! Identifiers for RETRACE entities.
//!
//! Action ids are dense counters assigned by the log. Session ids are
//! random UUIDs used to tell monitor instances apart in traces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action identifier - synthetic id issued by the action log on append
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(u64);

impl ActionId {
    /// The first id a fresh log hands out
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create from raw value
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get raw value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id issued after this one
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ActionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

/// Session identifier - identifies one monitor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random SessionId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

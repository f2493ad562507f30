//! Observed keys and observed values.
//!
//! An observed value is a reference to externally owned state. The core never
//! stores the value itself, only the key it is known by. Keys are validated on
//! construction so a keyless value can never reach the differ.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Stable identifier of a piece of observed state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObservedKey(String);

impl ObservedKey {
    /// Create a key, rejecting empty or padded identifiers
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKey` if the key is blank or has
    /// leading/trailing whitespace.
    pub fn new(key: impl Into<String>) -> CoreResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CoreError::InvalidKey {
                reason: "key is empty".to_string(),
            });
        }
        if key.trim() != key {
            return Err(CoreError::InvalidKey {
                reason: format!("key {:?} has surrounding whitespace", key),
            });
        }
        Ok(Self(key))
    }

    /// Get as string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObservedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ObservedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObservedKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObservedKey {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObservedKey> for String {
    fn from(key: ObservedKey) -> Self {
        key.0
    }
}

/// A uniquely keyed reference to externally owned state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservedValue {
    key: ObservedKey,
}

impl ObservedValue {
    /// Register an observed value by key
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKey` if the key is not usable.
    pub fn new(key: impl Into<String>) -> CoreResult<Self> {
        Ok(Self {
            key: ObservedKey::new(key)?,
        })
    }

    /// Get the key
    #[must_use]
    pub fn key(&self) -> &ObservedKey {
        &self.key
    }

    /// Register a list of keys, failing on the first unusable one
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKey` naming the position of the bad key.
    pub fn many<I, S>(keys: I) -> CoreResult<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter()
            .enumerate()
            .map(|(i, key)| {
                Self::new(key).map_err(|err| match err {
                    CoreError::InvalidKey { reason } => CoreError::InvalidKey {
                        reason: format!("value {}: {}", i, reason),
                    },
                    other => other,
                })
            })
            .collect()
    }
}

impl From<ObservedKey> for ObservedValue {
    fn from(key: ObservedKey) -> Self {
        Self { key }
    }
}

impl std::fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

//! Snapshot readers supplied by the host runtime.

use crate::error::AccessError;
use async_trait::async_trait;
use retrace_core::ObservedValue;
use serde_json::Value;
use std::sync::Arc;

/// Read access to one host snapshot
#[async_trait]
pub trait SnapshotReader: Send + Sync {
    /// Read the value of `value` in this snapshot
    ///
    /// May suspend while the host resolves the value.
    ///
    /// # Errors
    ///
    /// Returns `AccessError` if the host cannot produce the value.
    async fn get_value(&self, value: &ObservedValue) -> Result<Value, AccessError>;

    /// Nodes the host reports as modified by the transaction that produced
    /// this snapshot; order is unspecified and may contain repeats
    fn modified_nodes(&self) -> Vec<ObservedValue>;
}

/// Shared handle to a snapshot, retained by the registry
pub type SnapshotHandle = Arc<dyn SnapshotReader>;

/// One committed transaction as reported by the host
#[derive(Clone)]
pub struct TransactionEvent {
    /// Snapshot before the transaction
    pub previous: SnapshotHandle,
    /// Snapshot after the transaction
    pub next: SnapshotHandle,
}

impl TransactionEvent {
    /// Create an event
    #[must_use]
    pub fn new(previous: SnapshotHandle, next: SnapshotHandle) -> Self {
        Self { previous, next }
    }
}

impl std::fmt::Debug for TransactionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionEvent")
            .field("modified", &self.next.modified_nodes())
            .finish_non_exhaustive()
    }
}

//! In-memory host runtime.
//!
//! `MemoryStore` is a keyed value store that produces immutable snapshots and
//! reports each write batch to subscribers as one transaction. It backs the
//! CLI, the TUI and the tests. Reads can be made to fail, stall or hang per
//! key to exercise the accessor error paths.

use crate::error::{AccessError, MonitorResult};
use crate::reader::{SnapshotReader, TransactionEvent};
use crate::subscription::{TransactionSink, TransactionSource, Unsubscribe};
use async_trait::async_trait;
use indexmap::IndexMap;
use retrace_core::{ObservedKey, ObservedValue};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Injected read behavior for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadFault {
    /// Reads fail with this reason
    Fail(String),
    /// Reads succeed after this delay
    Delay(Duration),
    /// Reads never complete
    Hang,
}

type FaultMap = Arc<RwLock<HashMap<ObservedKey, ReadFault>>>;

/// Immutable view of the store after one transaction
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    values: IndexMap<ObservedKey, Value>,
    modified: Vec<ObservedValue>,
    faults: FaultMap,
}

impl MemorySnapshot {
    /// Snapshot with no values and no faults
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Value stored under `key`, if written
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing was ever written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[async_trait]
impl SnapshotReader for MemorySnapshot {
    async fn get_value(&self, value: &ObservedValue) -> Result<Value, AccessError> {
        let fault = self.faults.read().await.get(value.key()).cloned();
        match fault {
            Some(ReadFault::Fail(reason)) => return Err(AccessError::new(value.key().clone(), reason)),
            Some(ReadFault::Delay(delay)) => tokio::time::sleep(delay).await,
            Some(ReadFault::Hang) => std::future::pending::<()>().await,
            None => {}
        }
        // Keys never written read as null.
        Ok(self.values.get(value.key()).cloned().unwrap_or(Value::Null))
    }

    fn modified_nodes(&self) -> Vec<ObservedValue> {
        self.modified.clone()
    }
}

/// Keyed value store that emits one transaction per write batch
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    current: Arc<RwLock<Arc<MemorySnapshot>>>,
    sinks: Arc<RwLock<Vec<TransactionSink>>>,
    faults: FaultMap,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot
    pub async fn snapshot(&self) -> Arc<MemorySnapshot> {
        self.current.read().await.clone()
    }

    /// Apply a write batch without notifying subscribers
    ///
    /// Writes land in order, so a key written twice keeps the last value and
    /// is reported as modified twice.
    pub async fn apply(&self, changes: Vec<(ObservedValue, Value)>) -> Arc<MemorySnapshot> {
        let mut current = self.current.write().await;
        self.write(&mut *current, changes)
    }

    fn write(
        &self,
        current: &mut Arc<MemorySnapshot>,
        changes: Vec<(ObservedValue, Value)>,
    ) -> Arc<MemorySnapshot> {
        let mut values = current.values.clone();
        let mut modified = Vec::with_capacity(changes.len());
        for (node, value) in changes {
            values.insert(node.key().clone(), value);
            modified.push(node);
        }
        let next = Arc::new(MemorySnapshot {
            values,
            modified,
            faults: self.faults.clone(),
        });
        *current = next.clone();
        next
    }

    /// Apply a write batch and deliver it to every live subscriber
    ///
    /// Returns the number of sinks that accepted the transaction. Sinks that
    /// unsubscribed or whose session stopped are dropped. The store stays
    /// write-locked until delivery ends, so concurrent batches chain and
    /// arrive in commit order.
    ///
    /// # Errors
    ///
    /// Currently infallible; the result leaves room for hosts that reject
    /// writes.
    pub async fn transact(&self, changes: Vec<(ObservedValue, Value)>) -> MonitorResult<usize> {
        let mut current = self.current.write().await;
        let previous = current.clone();
        let next = self.write(&mut *current, changes);
        let event = TransactionEvent::new(previous, next);

        let sinks = self.sinks.read().await.clone();
        let mut delivered = 0;
        for sink in &sinks {
            match sink.deliver(event.clone()).await {
                Ok(()) => delivered += 1,
                Err(err) => tracing::debug!(error = %err, "dropping inactive sink"),
            }
        }
        self.sinks.write().await.retain(TransactionSink::is_active);
        drop(current);
        Ok(delivered)
    }

    /// Write one value as its own transaction
    ///
    /// # Errors
    ///
    /// See `transact`.
    pub async fn set(&self, node: ObservedValue, value: Value) -> MonitorResult<usize> {
        self.transact(vec![(node, value)]).await
    }

    /// Emit a transaction that modifies nothing
    ///
    /// # Errors
    ///
    /// See `transact`.
    pub async fn touch(&self) -> MonitorResult<usize> {
        self.transact(Vec::new()).await
    }

    /// Make reads of `node` misbehave in every snapshot, past and future
    pub async fn inject_fault(&self, node: ObservedValue, fault: ReadFault) {
        self.faults.write().await.insert(node.key().clone(), fault);
    }

    /// Restore normal reads of `node`
    pub async fn clear_fault(&self, node: &ObservedValue) {
        self.faults.write().await.remove(node.key());
    }

    /// Number of live subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.sinks
            .read()
            .await
            .iter()
            .filter(|sink| sink.is_active())
            .count()
    }
}

#[async_trait]
impl TransactionSource for MemoryStore {
    async fn subscribe(&self, sink: TransactionSink) -> Unsubscribe {
        let guard = sink.guard();
        self.sinks.write().await.push(sink);
        guard
    }
}

//! Turns one host transaction into a folded state transition.
//!
//! All previous/next reads for a transaction are started together and joined
//! before anything is folded, so the result is published only once every
//! read has resolved. Results are folded in target order regardless of
//! completion order.

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::reader::{SnapshotHandle, TransactionEvent};
use futures::future::try_join_all;
use retrace_core::ObservedValue;
use retrace_log::{RecordedTransaction, StateTransition, TransactionAccumulator};
use serde_json::Value;
use std::time::Duration;

/// Reads and folds transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionRecorder {
    values: Option<Vec<ObservedValue>>,
    timeout: Option<Duration>,
}

impl TransactionRecorder {
    /// Create a recorder that scans modified nodes and never times out
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder from the session config
    #[must_use]
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            values: config.explicit_values().map(<[_]>::to_vec),
            timeout: config.read_timeout(),
        }
    }

    /// Diff only these values
    #[must_use]
    pub fn with_values(mut self, values: Vec<ObservedValue>) -> Self {
        self.values = Some(values).filter(|values| !values.is_empty());
        self
    }

    /// Bound each read
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Values to diff for `event`
    #[must_use]
    pub fn targets(&self, event: &TransactionEvent) -> Vec<ObservedValue> {
        match &self.values {
            Some(values) => values.clone(),
            None => event.next.modified_nodes(),
        }
    }

    /// Read every target and fold the transaction onto `seed`
    ///
    /// # Errors
    ///
    /// Returns the first accessor failure or timeout; nothing is folded in
    /// that case.
    pub async fn record(
        &self,
        seed: &StateTransition,
        event: &TransactionEvent,
    ) -> MonitorResult<RecordedTransaction> {
        let targets = self.targets(event);
        let reads = targets
            .into_iter()
            .map(|value| self.read_pair(event, value));
        let pairs = try_join_all(reads).await?;

        let mut acc = TransactionAccumulator::seeded(seed);
        acc.fold_all(pairs);
        Ok(acc.finish())
    }

    async fn read_pair(
        &self,
        event: &TransactionEvent,
        value: ObservedValue,
    ) -> MonitorResult<(ObservedValue, Value, Value)> {
        let (previous, next) = tokio::try_join!(
            self.read(&event.previous, &value),
            self.read(&event.next, &value),
        )?;
        Ok((value, previous, next))
    }

    async fn read(&self, snapshot: &SnapshotHandle, value: &ObservedValue) -> MonitorResult<Value> {
        match self.timeout {
            None => Ok(snapshot.get_value(value).await?),
            Some(limit) => match tokio::time::timeout(limit, snapshot.get_value(value)).await {
                Ok(read) => Ok(read?),
                Err(_) => Err(MonitorError::Timeout {
                    key: value.key().clone(),
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }),
            },
        }
    }
}

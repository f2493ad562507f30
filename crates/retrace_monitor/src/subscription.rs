//! Observation subscription contract between host runtime and monitor.
//!
//! A host implements `TransactionSource` and calls `TransactionSink::deliver`
//! once per committed transaction. Delivery feeds the session inbox, which
//! processes transactions strictly one at a time.

use crate::error::{MonitorError, MonitorResult};
use crate::reader::TransactionEvent;
use crate::session::Envelope;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Host side of the subscription
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Start delivering transactions to `sink` until the returned guard is
    /// dropped or `unsubscribe` is called
    async fn subscribe(&self, sink: TransactionSink) -> Unsubscribe;
}

/// Delivery endpoint handed to a host
#[derive(Debug, Clone)]
pub struct TransactionSink {
    tx: mpsc::Sender<Envelope>,
    token: CancellationToken,
}

impl TransactionSink {
    pub(crate) fn new(tx: mpsc::Sender<Envelope>) -> Self {
        Self {
            tx,
            token: CancellationToken::new(),
        }
    }

    /// Hand one transaction to the session
    ///
    /// Waits for inbox capacity, never for processing.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Unsubscribed` after unsubscribe and
    /// `MonitorError::SessionClosed` once the session has stopped.
    pub async fn deliver(&self, event: TransactionEvent) -> MonitorResult<()> {
        if self.token.is_cancelled() {
            return Err(MonitorError::Unsubscribed);
        }
        self.tx
            .send(Envelope::Transaction(event))
            .await
            .map_err(|_| MonitorError::SessionClosed)
    }

    /// Whether deliveries can still succeed
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.tx.is_closed()
    }

    /// Guard that cancels this sink when dropped
    #[must_use]
    pub fn guard(&self) -> Unsubscribe {
        Unsubscribe {
            token: Some(self.token.clone()),
        }
    }
}

/// Cancels a subscription on `unsubscribe` or drop
#[must_use = "dropping the guard unsubscribes immediately"]
#[derive(Debug)]
pub struct Unsubscribe {
    token: Option<CancellationToken>,
}

impl Unsubscribe {
    /// Stop delivery now
    pub fn unsubscribe(mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }

    /// Keep the subscription alive for the life of the session
    pub fn detach(mut self) {
        self.token = None;
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySnapshot;
    use std::sync::Arc;

    fn event() -> TransactionEvent {
        let snapshot = Arc::new(MemorySnapshot::empty());
        TransactionEvent::new(snapshot.clone(), snapshot)
    }

    #[tokio::test]
    async fn test_deliver_reaches_inbox() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = TransactionSink::new(tx);
        sink.deliver(event()).await.unwrap();
        assert!(matches!(rx.recv().await, Some(Envelope::Transaction(_))));
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let (tx, _rx) = mpsc::channel(4);
        let sink = TransactionSink::new(tx);
        sink.guard().unsubscribe();
        assert!(!sink.is_active());
        assert_eq!(sink.deliver(event()).await, Err(MonitorError::Unsubscribed));
    }

    #[tokio::test]
    async fn test_drop_guard_unsubscribes() {
        let (tx, _rx) = mpsc::channel(4);
        let sink = TransactionSink::new(tx);
        {
            let _guard = sink.guard();
        }
        assert!(!sink.is_active());
    }

    #[tokio::test]
    async fn test_detach_keeps_subscription() {
        let (tx, _rx) = mpsc::channel(4);
        let sink = TransactionSink::new(tx);
        sink.guard().detach();
        assert!(sink.is_active());
    }

    #[tokio::test]
    async fn test_closed_session() {
        let (tx, rx) = mpsc::channel(4);
        let sink = TransactionSink::new(tx);
        drop(rx);
        assert!(!sink.is_active());
        assert_eq!(sink.deliver(event()).await, Err(MonitorError::SessionClosed));
    }
}

//! Single-writer monitor session.
//!
//! One task owns the history. Transactions and history commands arrive on a
//! single inbox and are handled strictly in arrival order; a transaction's
//! reads all resolve before the next envelope is looked at. Readers get
//! copy-on-write `SessionState` snapshots through a watch channel and never
//! block the writer. Cloning a state shares its log records with the
//! previous one.

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::events::MonitorEvent;
use crate::reader::{SnapshotHandle, TransactionEvent};
use crate::recorder::TransactionRecorder;
use crate::registry::SnapshotRegistry;
use crate::subscription::{TransactionSink, TransactionSource, Unsubscribe};
use retrace_core::{ActionId, ObservedKey, SessionId};
use retrace_log::{CommandOutcome, HistoryCommand, HistoryController, LogView};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

const EVENT_CAPACITY: usize = 64;

/// Message handled by the session task
#[derive(Debug)]
pub(crate) enum Envelope {
    Transaction(TransactionEvent),
    Command {
        command: HistoryCommand,
        reply: oneshot::Sender<MonitorResult<CommandOutcome>>,
    },
    Settle(oneshot::Sender<()>),
}

/// Everything a session publishes after a change
#[derive(Debug, Clone)]
pub struct SessionState {
    history: HistoryController,
    snapshots: SnapshotRegistry,
}

impl SessionState {
    fn new(config: &MonitorConfig) -> Self {
        Self {
            history: HistoryController::new(config.history_mode),
            snapshots: SnapshotRegistry::bounded(config.max_snapshots),
        }
    }

    /// Log and cursor
    #[must_use]
    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    /// Retained snapshot handles
    #[must_use]
    pub fn snapshots(&self) -> &SnapshotRegistry {
        &self.snapshots
    }

    /// Rendering view of the log
    #[must_use]
    pub fn view(&self) -> LogView {
        self.history.view()
    }
}

/// The session task
pub struct MonitorSession {
    session_id: SessionId,
    config: Arc<MonitorConfig>,
    recorder: TransactionRecorder,
    state: Arc<SessionState>,
    inbox: mpsc::Receiver<Envelope>,
    state_tx: watch::Sender<Arc<SessionState>>,
    events: broadcast::Sender<MonitorEvent>,
}

impl MonitorSession {
    /// Start a session on the current runtime
    ///
    /// The task ends once every handle and sink has been dropped.
    #[must_use]
    pub fn spawn(config: MonitorConfig) -> MonitorHandle {
        let session_id = SessionId::new();
        let config = Arc::new(config);
        let state = Arc::new(SessionState::new(&config));
        let (tx, inbox) = mpsc::channel(config.channel_capacity.max(1));
        let (state_tx, state_rx) = watch::channel(state.clone());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let session = Self {
            session_id,
            recorder: TransactionRecorder::from_config(&config),
            config: config.clone(),
            state,
            inbox,
            state_tx,
            events: events.clone(),
        };
        tokio::spawn(session.run());

        MonitorHandle {
            session_id,
            config,
            tx,
            state_rx,
            events,
        }
    }

    async fn run(mut self) {
        tracing::info!(
            session = %self.session_id,
            mode = ?self.config.history_mode,
            explicit = self.config.explicit_values().is_some(),
            "monitor session started"
        );
        while let Some(envelope) = self.inbox.recv().await {
            match envelope {
                Envelope::Transaction(event) => self.on_transaction(event).await,
                Envelope::Command { command, reply } => {
                    let result = self.on_command(command);
                    let _ = reply.send(result);
                }
                Envelope::Settle(reply) => {
                    let _ = reply.send(());
                }
            }
        }
        tracing::info!(
            session = %self.session_id,
            actions = self.state.history.log().len(),
            "monitor session stopped"
        );
    }

    async fn on_transaction(&mut self, event: TransactionEvent) {
        let seed = self.state.history.seed();
        let recorded = match self.recorder.record(&seed, &event).await {
            Ok(recorded) => recorded,
            Err(err) => {
                tracing::warn!(session = %self.session_id, error = %err, "transaction dropped");
                self.emit(MonitorEvent::TransactionFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };

        let changed: Vec<ObservedKey> = recorded.payload.changed_keys().into_iter().cloned().collect();
        let mut next = SessionState::clone(&self.state);
        let action_id = next.history.record(recorded, &self.config.action_label);
        let evicted = next.snapshots.insert(action_id, event.next);
        if !evicted.is_empty() {
            tracing::trace!(evicted = evicted.len(), "snapshot handles evicted");
        }
        self.publish(next);
        self.emit(MonitorEvent::ActionRecorded { action_id, changed });
    }

    fn on_command(&mut self, command: HistoryCommand) -> MonitorResult<CommandOutcome> {
        let mut next = SessionState::clone(&self.state);
        let outcome = match next.history.apply(command) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%command, error = %err, "history command rejected");
                return Err(MonitorError::from(err));
            }
        };

        if outcome.is_applied() {
            next.snapshots.release(outcome.removed());
            self.publish(next);
            self.emit(MonitorEvent::CommandApplied {
                command,
                outcome: outcome.clone(),
            });
        } else {
            tracing::warn!(
                %command,
                mode = ?self.config.history_mode,
                "history command not implemented in this mode"
            );
            self.emit(MonitorEvent::CommandIgnored { command });
        }
        Ok(outcome)
    }

    fn publish(&mut self, next: SessionState) {
        self.state = Arc::new(next);
        self.state_tx.send_replace(self.state.clone());
    }

    fn emit(&self, event: MonitorEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Cheap, cloneable handle to a running session
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    session_id: SessionId,
    config: Arc<MonitorConfig>,
    tx: mpsc::Sender<Envelope>,
    state_rx: watch::Receiver<Arc<SessionState>>,
    events: broadcast::Sender<MonitorEvent>,
}

impl MonitorHandle {
    /// Session identifier
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// New delivery endpoint for a host
    #[must_use]
    pub fn sink(&self) -> TransactionSink {
        TransactionSink::new(self.tx.clone())
    }

    /// Subscribe this session to `source`
    pub async fn attach(&self, source: &dyn TransactionSource) -> Unsubscribe {
        source.subscribe(self.sink()).await
    }

    /// Queue a history command and wait for its outcome
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Core` if the command targets a missing action
    /// or index, and `MonitorError::SessionClosed` if the task has stopped.
    pub async fn apply(&self, command: HistoryCommand) -> MonitorResult<CommandOutcome> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope::Command { command, reply })
            .await
            .map_err(|_| MonitorError::SessionClosed)?;
        rx.await.map_err(|_| MonitorError::SessionClosed)?
    }

    /// Commit the staged entries
    ///
    /// # Errors
    ///
    /// See `apply`.
    pub async fn commit(&self) -> MonitorResult<CommandOutcome> {
        self.apply(HistoryCommand::Commit).await
    }

    /// Roll back to the committed baseline
    ///
    /// # Errors
    ///
    /// See `apply`.
    pub async fn rollback(&self) -> MonitorResult<CommandOutcome> {
        self.apply(HistoryCommand::Rollback).await
    }

    /// Remove skipped actions
    ///
    /// # Errors
    ///
    /// See `apply`.
    pub async fn sweep(&self) -> MonitorResult<CommandOutcome> {
        self.apply(HistoryCommand::Sweep).await
    }

    /// Clear the session
    ///
    /// # Errors
    ///
    /// See `apply`.
    pub async fn reset(&self) -> MonitorResult<CommandOutcome> {
        self.apply(HistoryCommand::Reset).await
    }

    /// Skip or unskip one action
    ///
    /// # Errors
    ///
    /// See `apply`.
    pub async fn toggle_action(&self, action_id: ActionId) -> MonitorResult<CommandOutcome> {
        self.apply(HistoryCommand::ToggleAction { action_id }).await
    }

    /// Highlight an entry of the active window
    ///
    /// # Errors
    ///
    /// See `apply`.
    pub async fn jump_to_state(&self, index: usize) -> MonitorResult<CommandOutcome> {
        self.apply(HistoryCommand::JumpToState { index }).await
    }

    /// Wait until everything queued before this call has been handled
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::SessionClosed` if the task has stopped.
    pub async fn settled(&self) -> MonitorResult<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope::Settle(reply))
            .await
            .map_err(|_| MonitorError::SessionClosed)?;
        rx.await.map_err(|_| MonitorError::SessionClosed)
    }

    /// Latest published state
    #[must_use]
    pub fn state(&self) -> Arc<SessionState> {
        self.state_rx.borrow().clone()
    }

    /// Rendering view of the latest state
    #[must_use]
    pub fn view(&self) -> LogView {
        self.state().view()
    }

    /// Receiver notified on every published state
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<SessionState>> {
        self.state_rx.clone()
    }

    /// Receiver for session events published from now on
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    /// Snapshot that produced `action_id`, if still retained
    #[must_use]
    pub fn snapshot(&self, action_id: ActionId) -> Option<SnapshotHandle> {
        self.state().snapshots.get(action_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, ReadFault};
    use retrace_core::{CoreError, ObservedValue};
    use retrace_log::{HistoryMode, StateTransition};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn observed(key: &str) -> ObservedValue {
        ObservedValue::new(key).unwrap()
    }

    fn writes(pairs: &[(&str, Value)]) -> Vec<(ObservedValue, Value)> {
        pairs.iter().map(|(k, v)| (observed(k), v.clone())).collect()
    }

    async fn session(config: MonitorConfig) -> (MemoryStore, MonitorHandle) {
        let store = MemoryStore::new();
        let handle = MonitorSession::spawn(config);
        handle.attach(&store).await.detach();
        (store, handle)
    }

    fn payloads(view: &LogView) -> Vec<StateTransition> {
        view.actions_by_id.values().map(|a| a.payload.clone()).collect()
    }

    #[tokio::test]
    async fn test_records_one_action_per_transaction() {
        let (store, handle) = session(MonitorConfig::default()).await;
        store.transact(writes(&[("a", json!(1))])).await.unwrap();
        store.transact(writes(&[("b", json!(2))])).await.unwrap();
        handle.settled().await.unwrap();

        let view = handle.view();
        assert_eq!(view.len(), 2);
        assert_eq!(view.staged_action_ids, vec![ActionId::from_raw(0), ActionId::from_raw(1)]);
        assert_eq!(view.actions_by_id[&ActionId::from_raw(1)].kind, "Updated state");

        // Cumulative state carries `a` forward.
        let last = &view.computed_states[1];
        assert_eq!(last.next_state.get("a"), Some(&json!(1)));
        assert_eq!(last.next_state.get("b"), Some(&json!(2)));
        assert_eq!(last.previous_state.get("b"), Some(&Value::Null));
        assert_eq!(view.current, **last);
        handle.state().history().log().validate().unwrap();
    }

    #[tokio::test]
    async fn test_published_states_share_records() {
        let (store, handle) = session(MonitorConfig::default()).await;
        store.transact(writes(&[("a", json!(1))])).await.unwrap();
        handle.settled().await.unwrap();
        let before = handle.state();

        store.transact(writes(&[("b", json!(2))])).await.unwrap();
        handle.settled().await.unwrap();
        let after = handle.state();

        let id = ActionId::from_raw(0);
        let (old, new) = (before.history().log(), after.history().log());
        assert!(Arc::ptr_eq(&old.actions_by_id()[&id], &new.actions_by_id()[&id]));
        assert!(Arc::ptr_eq(&old.computed_states()[0], &new.computed_states()[0]));
        assert_eq!(old.len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_matches_implicit_when_lists_agree() {
        let (store, implicit) = session(MonitorConfig::default()).await;
        let explicit = MonitorSession::spawn(
            MonitorConfig::new().with_values(ObservedValue::many(["a", "b"]).unwrap()),
        );
        explicit.attach(&store).await.detach();

        store.transact(writes(&[("a", json!(1)), ("b", json!(1))])).await.unwrap();
        store.transact(writes(&[("a", json!(2)), ("b", json!("x"))])).await.unwrap();
        implicit.settled().await.unwrap();
        explicit.settled().await.unwrap();

        let left = implicit.view();
        let right = explicit.view();
        assert_eq!(left.computed_states, right.computed_states);
        assert_eq!(payloads(&left), payloads(&right));
    }

    #[tokio::test]
    async fn test_explicit_records_even_when_unmodified() {
        let (store, handle) = session(
            MonitorConfig::new().with_values(vec![observed("watched")]),
        )
        .await;
        store.transact(writes(&[("other", json!(1))])).await.unwrap();
        handle.settled().await.unwrap();

        let view = handle.view();
        assert_eq!(view.len(), 1);
        let payload = &payloads(&view)[0];
        assert_eq!(payload.next_state.get("watched"), Some(&Value::Null));
        assert!(payload.next_state.get("other").is_none());
    }

    #[tokio::test]
    async fn test_empty_transaction_still_appends() {
        let (store, handle) = session(MonitorConfig::default()).await;
        store.set(observed("a"), json!(1)).await.unwrap();
        store.touch().await.unwrap();
        handle.settled().await.unwrap();

        let view = handle.view();
        assert_eq!(view.len(), 2);
        assert!(payloads(&view)[1].is_empty());
        assert_eq!(view.computed_states[1], view.computed_states[0]);
    }

    #[tokio::test]
    async fn test_last_write_wins_across_transactions() {
        let (store, handle) = session(MonitorConfig::default()).await;
        for n in 0..5 {
            store.set(observed("n"), json!(n)).await.unwrap();
        }
        handle.settled().await.unwrap();

        let view = handle.view();
        assert_eq!(view.current.next_state.get("n"), Some(&json!(4)));
        assert_eq!(view.current.previous_state.get("n"), Some(&json!(3)));
    }

    #[tokio::test]
    async fn test_accessor_failure_leaves_log_unchanged() {
        let (store, handle) = session(MonitorConfig::default()).await;
        let mut events = handle.events();
        store.set(observed("a"), json!(1)).await.unwrap();
        store.inject_fault(observed("bad"), ReadFault::Fail("boom".into())).await;
        store.transact(writes(&[("a", json!(2)), ("bad", json!(0))])).await.unwrap();
        handle.settled().await.unwrap();

        let view = handle.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view.current.next_state.get("a"), Some(&json!(1)));

        assert!(matches!(events.recv().await.unwrap(), MonitorEvent::ActionRecorded { .. }));
        match events.recv().await.unwrap() {
            MonitorEvent::TransactionFailed { reason } => assert!(reason.contains("boom")),
            other => panic!("unexpected event: {other:?}"),
        }

        // The session keeps going.
        store.set(observed("a"), json!(3)).await.unwrap();
        handle.settled().await.unwrap();
        assert_eq!(handle.view().len(), 2);
        assert_eq!(handle.view().current.previous_state.get("a"), Some(&json!(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_timeout_drops_transaction() {
        let (store, handle) = session(MonitorConfig::new().with_read_timeout(25)).await;
        store.inject_fault(observed("slow"), ReadFault::Hang).await;
        store.set(observed("slow"), json!(1)).await.unwrap();
        store.set(observed("fast"), json!(1)).await.unwrap();
        handle.settled().await.unwrap();

        let view = handle.view();
        assert_eq!(view.len(), 1);
        assert!(view.current.next_state.contains_key("fast"));
        assert!(!view.current.next_state.contains_key("slow"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transactions_are_serialized() {
        let (store, handle) = session(MonitorConfig::default()).await;
        store
            .inject_fault(observed("slow"), ReadFault::Delay(Duration::from_millis(50)))
            .await;
        store.set(observed("slow"), json!("first")).await.unwrap();
        store.set(observed("quick"), json!("second")).await.unwrap();
        handle.settled().await.unwrap();

        let view = handle.view();
        let first = &view.actions_by_id[&ActionId::from_raw(0)];
        let second = &view.actions_by_id[&ActionId::from_raw(1)];
        assert!(first.payload.next_state.contains_key("slow"));
        assert!(second.payload.next_state.contains_key("quick"));
        // The second transaction was seeded from the first.
        assert_eq!(view.computed_states[1].next_state.get("slow"), Some(&json!("first")));
    }

    #[tokio::test]
    async fn test_recording_mode_ignores_time_travel_commands() {
        let (store, handle) = session(MonitorConfig::default()).await;
        let mut events = handle.events();
        store.set(observed("a"), json!(1)).await.unwrap();
        handle.settled().await.unwrap();
        let before = handle.view();
        let _ = events.recv().await;

        for command in [HistoryCommand::Rollback, HistoryCommand::Sweep, HistoryCommand::Reset] {
            let outcome = handle.apply(command).await.unwrap();
            assert_eq!(outcome, CommandOutcome::NotImplemented { command });
            assert_eq!(events.recv().await.unwrap(), MonitorEvent::CommandIgnored { command });
        }
        assert_eq!(handle.view(), before);
    }

    #[tokio::test]
    async fn test_commit_and_jump() {
        let (store, handle) = session(MonitorConfig::default()).await;
        for n in 0..3 {
            store.set(observed("n"), json!(n)).await.unwrap();
        }
        handle.settled().await.unwrap();

        assert_eq!(
            handle.commit().await.unwrap(),
            CommandOutcome::Committed { current_initial_idx: 2 }
        );
        let view = handle.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view.computed_states[0].next_state.get("n"), Some(&json!(2)));

        let err = handle.jump_to_state(5).await.unwrap_err();
        assert_eq!(
            err,
            MonitorError::Core(CoreError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(handle.jump_to_state(0).await.unwrap(), CommandOutcome::Jumped { index: 0 });
    }

    #[tokio::test]
    async fn test_time_travel_rollback_releases_snapshots() {
        let (store, handle) = session(
            MonitorConfig::new().with_history_mode(HistoryMode::TimeTravel),
        )
        .await;
        for n in 0..2 {
            store.set(observed("n"), json!(n)).await.unwrap();
        }
        handle.settled().await.unwrap();
        handle.commit().await.unwrap();
        store.set(observed("n"), json!(9)).await.unwrap();
        handle.settled().await.unwrap();
        assert!(handle.snapshot(ActionId::from_raw(2)).is_some());

        let outcome = handle.rollback().await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::RolledBack {
                baseline: Some(ActionId::from_raw(1)),
                removed: vec![ActionId::from_raw(2)],
            }
        );
        assert!(handle.snapshot(ActionId::from_raw(2)).is_none());
        assert!(handle.snapshot(ActionId::from_raw(1)).is_some());
        assert_eq!(handle.view().current.next_state.get("n"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_time_travel_toggle_and_sweep() {
        let (store, handle) = session(
            MonitorConfig::new().with_history_mode(HistoryMode::TimeTravel),
        )
        .await;
        store.set(observed("a"), json!(1)).await.unwrap();
        store.set(observed("b"), json!(2)).await.unwrap();
        handle.settled().await.unwrap();

        let toggled = handle.toggle_action(ActionId::from_raw(0)).await.unwrap();
        assert_eq!(
            toggled,
            CommandOutcome::Toggled { action_id: ActionId::from_raw(0), skipped: true }
        );
        let swept = handle.sweep().await.unwrap();
        assert_eq!(swept.removed(), &[ActionId::from_raw(0)]);

        let view = handle.view();
        assert_eq!(view.staged_action_ids, vec![ActionId::from_raw(1)]);
        assert!(!view.current.next_state.contains_key("a"));
        assert!(handle.snapshot(ActionId::from_raw(0)).is_none());

        let err = handle.toggle_action(ActionId::from_raw(0)).await.unwrap_err();
        assert_eq!(err, MonitorError::Core(CoreError::UnknownAction { id: 0 }));
    }

    #[tokio::test]
    async fn test_max_snapshots_bounds_registry_not_log() {
        let (store, handle) = session(MonitorConfig::new().with_max_snapshots(2)).await;
        for n in 0..4 {
            store.set(observed("n"), json!(n)).await.unwrap();
        }
        handle.settled().await.unwrap();

        let state = handle.state();
        assert_eq!(state.history().log().len(), 4);
        assert_eq!(state.snapshots().len(), 2);
        assert!(handle.snapshot(ActionId::from_raw(0)).is_none());
        assert!(handle.snapshot(ActionId::from_raw(3)).is_some());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_recording() {
        let store = MemoryStore::new();
        let handle = MonitorSession::spawn(MonitorConfig::default());
        let guard = handle.attach(&store).await;
        store.set(observed("a"), json!(1)).await.unwrap();
        guard.unsubscribe();
        store.set(observed("a"), json!(2)).await.unwrap();
        handle.settled().await.unwrap();

        assert_eq!(handle.view().len(), 1);
        assert_eq!(store.subscriber_count().await, 0);
    }

    fn play_batches(config: MonitorConfig, batches: &[Vec<(ObservedValue, Value)>]) -> LogView {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let (store, handle) = session(config).await;
            for batch in batches {
                store.transact(batch.clone()).await.unwrap();
            }
            handle.settled().await.unwrap();
            handle.view()
        })
    }

    fn batch_strategy() -> impl proptest::strategy::Strategy<Value = Vec<(ObservedValue, Value)>> {
        use proptest::prelude::*;
        (Just(vec!["a", "b", "c"]).prop_shuffle(), prop::collection::vec(0i64..5, 3)).prop_map(
            |(keys, values)| {
                keys.into_iter()
                    .zip(values)
                    .map(|(key, value)| (observed(key), json!(value)))
                    .collect()
            },
        )
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(32))]

        #[test]
        fn prop_explicit_equals_implicit(batches in proptest::collection::vec(batch_strategy(), 0..6)) {
            let implicit = play_batches(MonitorConfig::default(), &batches);
            let explicit = play_batches(
                MonitorConfig::new().with_values(ObservedValue::many(["c", "a", "b"]).unwrap()),
                &batches,
            );
            proptest::prop_assert_eq!(&implicit.computed_states, &explicit.computed_states);
            proptest::prop_assert_eq!(payloads(&implicit), payloads(&explicit));
        }

        #[test]
        fn prop_last_write_wins(values in proptest::collection::vec(0i64..100, 1..8)) {
            let batch: Vec<_> = values.iter().map(|v| (observed("k"), json!(v))).collect();
            let view = play_batches(MonitorConfig::default(), &[batch]);
            let last = values.last().copied().unwrap_or_default();
            proptest::prop_assert_eq!(view.current.next_state.get("k"), Some(&json!(last)));
            proptest::prop_assert_eq!(view.current.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_watch_sees_published_state() {
        let (store, handle) = session(MonitorConfig::default()).await;
        let mut watch = handle.watch();
        store.set(observed("a"), json!(1)).await.unwrap();
        watch.changed().await.unwrap();
        assert_eq!(watch.borrow().history().log().len(), 1);
    }
}

//! Scripted host sessions.
//!
//! A script is a JSON list of steps played against a `MemoryStore` and a
//! monitor session:
//!
//! ```json
//! {"steps": [
//!   {"op": "set", "values": {"todos": [], "filter": "all"}},
//!   {"op": "empty"},
//!   {"op": "commit"},
//!   {"op": "toggle", "action_id": 0}
//! ]}
//! ```

use crate::error::{MonitorError, MonitorResult};
use crate::memory::MemoryStore;
use crate::session::MonitorHandle;
use indexmap::IndexMap;
use retrace_core::{ActionId, ObservedKey, ObservedValue};
use retrace_log::{CommandOutcome, HistoryCommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One scripted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// One transaction writing every listed key, in order
    Set {
        /// Keys and their new values
        values: IndexMap<ObservedKey, Value>,
    },
    /// One transaction that writes nothing
    Empty,
    /// Commit
    Commit,
    /// Roll back
    Rollback,
    /// Sweep skipped actions
    Sweep,
    /// Reset the session
    Reset,
    /// Toggle the skip flag of one action
    Toggle {
        /// Target action
        action_id: ActionId,
    },
    /// Highlight one entry
    Jump {
        /// Index into the active window
        index: usize,
    },
}

impl ScriptStep {
    /// History command for this step, if it is one
    #[must_use]
    pub fn command(&self) -> Option<HistoryCommand> {
        match self {
            Self::Set { .. } | Self::Empty => None,
            Self::Commit => Some(HistoryCommand::Commit),
            Self::Rollback => Some(HistoryCommand::Rollback),
            Self::Sweep => Some(HistoryCommand::Sweep),
            Self::Reset => Some(HistoryCommand::Reset),
            Self::Toggle { action_id } => Some(HistoryCommand::ToggleAction {
                action_id: *action_id,
            }),
            Self::Jump { index } => Some(HistoryCommand::JumpToState { index: *index }),
        }
    }
}

/// A scripted host session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Steps in play order
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Script` for malformed JSON, unknown ops or
    /// blank keys.
    pub fn from_json(input: &str) -> MonitorResult<Self> {
        serde_json::from_str(input).map_err(|err| MonitorError::Script(err.to_string()))
    }

    /// Number of steps that produce a transaction
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.command().is_none())
            .count()
    }

    /// Play every step, then wait for the session to drain
    ///
    /// Returns the outcome of each command step in order.
    ///
    /// # Errors
    ///
    /// Stops at the first command the session rejects.
    pub async fn play(
        &self,
        store: &MemoryStore,
        handle: &MonitorHandle,
    ) -> MonitorResult<Vec<CommandOutcome>> {
        let mut outcomes = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            tracing::trace!(step = index, ?step, "playing script step");
            match step {
                ScriptStep::Set { values } => {
                    let changes = values
                        .iter()
                        .map(|(key, value)| (ObservedValue::from(key.clone()), value.clone()))
                        .collect();
                    store.transact(changes).await?;
                }
                ScriptStep::Empty => {
                    store.touch().await?;
                }
                other => {
                    if let Some(command) = other.command() {
                        outcomes.push(handle.apply(command).await?);
                    }
                }
            }
        }
        handle.settled().await?;
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::session::MonitorSession;
    use retrace_log::HistoryMode;
    use serde_json::json;

    const TODO_SCRIPT: &str = r#"{"steps": [
        {"op": "set", "values": {"todos": [], "filter": "all"}},
        {"op": "set", "values": {"todos": ["milk"]}},
        {"op": "empty"},
        {"op": "commit"},
        {"op": "sweep"}
    ]}"#;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(TODO_SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 5);
        assert_eq!(script.transaction_count(), 3);
        assert_eq!(script.steps[3].command(), Some(HistoryCommand::Commit));
        assert_eq!(script.steps[2], ScriptStep::Empty);
    }

    #[test]
    fn test_parse_toggle_and_jump() {
        let script = Script::from_json(
            r#"{"steps": [{"op": "toggle", "action_id": 4}, {"op": "jump", "index": 1}]}"#,
        )
        .unwrap();
        assert_eq!(
            script.steps[0].command(),
            Some(HistoryCommand::ToggleAction { action_id: ActionId::from_raw(4) })
        );
        assert_eq!(script.steps[1].command(), Some(HistoryCommand::JumpToState { index: 1 }));
    }

    #[test]
    fn test_rejects_bad_scripts() {
        assert!(matches!(
            Script::from_json(r#"{"steps": [{"op": "explode"}]}"#),
            Err(MonitorError::Script(_))
        ));
        assert!(matches!(
            Script::from_json(r#"{"steps": [{"op": "set", "values": {" ": 1}}]}"#),
            Err(MonitorError::Script(_))
        ));
        assert_eq!(Script::from_json("{}").unwrap(), Script::default());
    }

    #[tokio::test]
    async fn test_play_recording_session() {
        let script = Script::from_json(TODO_SCRIPT).unwrap();
        let store = MemoryStore::new();
        let handle = MonitorSession::spawn(MonitorConfig::default());
        handle.attach(&store).await.detach();

        let outcomes = script.play(&store, &handle).await.unwrap();
        assert_eq!(
            outcomes,
            vec![
                CommandOutcome::Committed { current_initial_idx: 2 },
                CommandOutcome::NotImplemented { command: HistoryCommand::Sweep },
            ]
        );

        let state = handle.state();
        assert_eq!(state.history().log().len(), 3);
        let view = handle.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view.current.next_state.get("todos"), Some(&json!(["milk"])));
        assert_eq!(view.current.next_state.get("filter"), Some(&json!("all")));
    }

    #[tokio::test]
    async fn test_play_stops_on_rejected_command() {
        let script = Script::from_json(r#"{"steps": [{"op": "toggle", "action_id": 9}]}"#).unwrap();
        let store = MemoryStore::new();
        let handle =
            MonitorSession::spawn(MonitorConfig::new().with_history_mode(HistoryMode::TimeTravel));
        handle.attach(&store).await.detach();

        assert!(matches!(
            script.play(&store, &handle).await,
            Err(MonitorError::Core(_))
        ));
    }
}

//! Notifications published by a session after each state change.

use retrace_core::{ActionId, ObservedKey};
use retrace_log::{CommandOutcome, HistoryCommand};
use serde::Serialize;

/// Session event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MonitorEvent {
    /// A transaction was folded into a new action
    ActionRecorded {
        /// New action
        action_id: ActionId,
        /// Keys whose value differs between the action's two sides
        changed: Vec<ObservedKey>,
    },
    /// A transaction was dropped; the log is unchanged
    TransactionFailed {
        /// Error text
        reason: String,
    },
    /// A history command changed the log or cursor
    CommandApplied {
        /// The command
        command: HistoryCommand,
        /// What it did
        outcome: CommandOutcome,
    },
    /// A history command is inert in the current mode
    CommandIgnored {
        /// The command
        command: HistoryCommand,
    },
}

impl MonitorEvent {
    /// Short name for logs and status lines
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActionRecorded { .. } => "action_recorded",
            Self::TransactionFailed { .. } => "transaction_failed",
            Self::CommandApplied { .. } => "command_applied",
            Self::CommandIgnored { .. } => "command_ignored",
        }
    }
}

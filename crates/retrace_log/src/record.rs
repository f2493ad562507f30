//! Action records stored in the log.

use crate::transition::StateTransition;
use chrono::{DateTime, Utc};
use retrace_core::ActionId;
use serde::{Deserialize, Serialize};

/// Label given to actions recorded from state commits
pub const DEFAULT_ACTION_LABEL: &str = "Updated state";

/// One recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Id issued by the log
    pub action_id: ActionId,
    /// Action-kind label
    #[serde(rename = "type")]
    pub kind: String,
    /// Keys touched by this transaction only
    #[serde(flatten)]
    pub payload: StateTransition,
    /// Wall-clock time of the append
    pub recorded_at: DateTime<Utc>,
}

impl ActionRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn new(action_id: ActionId, kind: impl Into<String>, payload: StateTransition) -> Self {
        Self {
            action_id,
            kind: kind.into(),
            payload,
            recorded_at: Utc::now(),
        }
    }

    /// Whether the transaction touched no observed value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

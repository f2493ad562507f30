//! Read-only view handed to rendering layers.
//!
//! `computed_states` and `staged_action_ids` are windowed at the cursor;
//! `actions_by_id` is not, so committed actions stay addressable by id.
//! Records and states are shared with the log, not copied.

use crate::cursor::HistoryCursor;
use crate::history::HistoryMode;
use crate::log::ActionLog;
use crate::record::ActionRecord;
use crate::transition::StateTransition;
use indexmap::IndexMap;
use retrace_core::ActionId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of the log as seen by consumers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    /// Cumulative state at the highlighted entry
    pub current: StateTransition,
    /// Active cumulative states
    pub computed_states: Vec<Arc<StateTransition>>,
    /// Active staged ids
    pub staged_action_ids: Vec<ActionId>,
    /// Every record, committed ones included
    pub actions_by_id: IndexMap<ActionId, Arc<ActionRecord>>,
    /// Skipped ids, ascending
    pub skipped_action_ids: Vec<ActionId>,
    /// Highlighted entry, relative to the active window
    pub current_state_index: usize,
    /// Cursor position
    pub current_initial_idx: usize,
    /// Cursor positions before each commit
    pub commited_idxs: Vec<usize>,
    /// Mode the controller runs in
    pub history_mode: HistoryMode,
}

/// One row of the active window
#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    /// Index within the active window
    pub index: usize,
    /// Recorded action
    pub action: &'a ActionRecord,
    /// Cumulative state after the action
    pub state: &'a StateTransition,
    /// Whether the action is skipped
    pub skipped: bool,
    /// Whether this is the highlighted entry
    pub selected: bool,
}

impl LogView {
    pub(crate) fn build(
        log: &ActionLog,
        cursor: &HistoryCursor,
        current_state_index: usize,
        history_mode: HistoryMode,
    ) -> Self {
        let current = log
            .computed_states()
            .get(current_state_index)
            .map(|state| StateTransition::clone(state))
            .unwrap_or_default();

        Self {
            current,
            computed_states: cursor.window(log.computed_states()).to_vec(),
            staged_action_ids: cursor.window(log.staged_action_ids()).to_vec(),
            actions_by_id: log.actions_by_id().clone(),
            skipped_action_ids: log.skipped_action_ids().iter().copied().collect(),
            current_state_index: current_state_index.saturating_sub(cursor.pos()),
            current_initial_idx: cursor.pos(),
            commited_idxs: cursor.commited_idxs.clone(),
            history_mode,
        }
    }

    /// Number of active entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged_action_ids.len()
    }

    /// True if the active window is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged_action_ids.is_empty()
    }

    /// Whether the active window holds any computed state
    #[must_use]
    pub fn has_states(&self) -> bool {
        !self.computed_states.is_empty()
    }

    /// Whether sweep would remove anything
    #[must_use]
    pub fn has_skipped_actions(&self) -> bool {
        !self.skipped_action_ids.is_empty()
    }

    /// Active entries in log order
    pub fn entries(&self) -> impl Iterator<Item = LogEntry<'_>> {
        self.staged_action_ids
            .iter()
            .zip(&self.computed_states)
            .enumerate()
            .filter_map(move |(index, (id, state))| {
                let action = self.actions_by_id.get(id)?;
                Some(LogEntry {
                    index,
                    action: action.as_ref(),
                    state: state.as_ref(),
                    skipped: self.skipped_action_ids.binary_search(id).is_ok(),
                    selected: index == self.current_state_index,
                })
            })
    }
}

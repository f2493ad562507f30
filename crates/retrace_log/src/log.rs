//! Append-only action log.
//!
//! `computed_states[i]` is the cumulative transition after applying
//! `staged_action_ids[i]`; the two sequences always have the same length.
//! Ids are issued from a counter that equals `staged_action_ids.len()` until
//! something is swept out of the middle, after which ids keep increasing and
//! are never handed out twice.
//!
//! Records and computed states are stored behind `Arc`, so cloning the log
//! copies pointers rather than payloads.

use crate::record::ActionRecord;
use crate::transition::StateTransition;
use indexmap::IndexMap;
use retrace_core::{ActionId, CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The action ledger
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLog {
    actions_by_id: IndexMap<ActionId, Arc<ActionRecord>>,
    computed_states: Vec<Arc<StateTransition>>,
    staged_action_ids: Vec<ActionId>,
    skipped_action_ids: BTreeSet<ActionId>,
    next_action_id: ActionId,
    /// Lowest id a truncate may rewind the counter to
    #[serde(default)]
    id_floor: ActionId,
}

impl ActionLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recorded transaction
    ///
    /// `payload` is stored on the record, `cumulative` in `computed_states`.
    pub fn append(
        &mut self,
        payload: StateTransition,
        cumulative: StateTransition,
        label: &str,
    ) -> ActionId {
        let action_id = self.next_action_id;
        self.actions_by_id
            .insert(action_id, Arc::new(ActionRecord::new(action_id, label, payload)));
        self.computed_states.push(Arc::new(cumulative));
        self.staged_action_ids.push(action_id);
        self.next_action_id = action_id.next();
        action_id
    }

    /// Number of staged actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged_action_ids.len()
    }

    /// True if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged_action_ids.is_empty()
    }

    /// Id the next append will receive
    #[must_use]
    pub fn next_action_id(&self) -> ActionId {
        self.next_action_id
    }

    /// Last cumulative transition, the seed for the next transaction
    #[must_use]
    pub fn latest_state(&self) -> Option<&StateTransition> {
        self.computed_states.last().map(Arc::as_ref)
    }

    /// All records, including those behind the history cursor
    #[must_use]
    pub fn actions_by_id(&self) -> &IndexMap<ActionId, Arc<ActionRecord>> {
        &self.actions_by_id
    }

    /// Cumulative transitions in log order
    #[must_use]
    pub fn computed_states(&self) -> &[Arc<StateTransition>] {
        &self.computed_states
    }

    /// Staged ids in log order
    #[must_use]
    pub fn staged_action_ids(&self) -> &[ActionId] {
        &self.staged_action_ids
    }

    /// Ids currently excluded from the cumulative fold
    #[must_use]
    pub fn skipped_action_ids(&self) -> &BTreeSet<ActionId> {
        &self.skipped_action_ids
    }

    /// Look up a record by id
    #[must_use]
    pub fn get(&self, id: ActionId) -> Option<&ActionRecord> {
        self.actions_by_id.get(&id).map(Arc::as_ref)
    }

    /// Position of `id` in the staged sequence
    #[must_use]
    pub fn position(&self, id: ActionId) -> Option<usize> {
        self.staged_action_ids.iter().position(|staged| *staged == id)
    }

    /// Whether `id` is skipped
    #[must_use]
    pub fn is_skipped(&self, id: ActionId) -> bool {
        self.skipped_action_ids.contains(&id)
    }

    /// Flip the skipped flag of `id` and rebuild the cumulative states
    ///
    /// Returns whether the action is skipped afterwards.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownAction` if `id` is not staged.
    pub fn toggle(&mut self, id: ActionId) -> CoreResult<bool> {
        if self.position(id).is_none() {
            return Err(CoreError::UnknownAction { id: id.as_u64() });
        }
        let skipped = if self.skipped_action_ids.remove(&id) {
            false
        } else {
            self.skipped_action_ids.insert(id);
            true
        };
        self.recompute();
        Ok(skipped)
    }

    /// Drop every staged action from position `len` onwards
    ///
    /// Returns the removed ids in log order.
    pub fn truncate(&mut self, len: usize) -> Vec<ActionId> {
        if len >= self.staged_action_ids.len() {
            return Vec::new();
        }
        let removed: Vec<ActionId> = self.staged_action_ids.split_off(len);
        self.computed_states.truncate(len);
        for id in &removed {
            self.actions_by_id.shift_remove(id);
            self.skipped_action_ids.remove(id);
        }
        // Tail ids can be issued again, swept ones cannot.
        self.next_action_id = self
            .staged_action_ids
            .last()
            .map_or(ActionId::zero(), ActionId::next)
            .max(self.id_floor);
        removed
    }

    /// Remove every skipped action and rebuild the cumulative states
    ///
    /// Returns `(position, id)` for each removed action, positions taken
    /// before removal.
    pub fn sweep(&mut self) -> Vec<(usize, ActionId)> {
        let removed: Vec<(usize, ActionId)> = self
            .staged_action_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| self.skipped_action_ids.contains(*id))
            .map(|(pos, id)| (pos, *id))
            .collect();
        if removed.is_empty() {
            return removed;
        }

        self.staged_action_ids
            .retain(|id| !self.skipped_action_ids.contains(id));
        for (_, id) in &removed {
            self.actions_by_id.shift_remove(id);
            self.id_floor = self.id_floor.max(id.next());
        }
        self.skipped_action_ids.clear();
        self.recompute();
        removed
    }

    /// Rebuild `computed_states` by folding every non-skipped payload
    ///
    /// A skipped action's computed state repeats the one before it.
    pub fn recompute(&mut self) {
        let mut acc = StateTransition::new();
        let mut computed = Vec::with_capacity(self.staged_action_ids.len());
        for id in &self.staged_action_ids {
            if !self.skipped_action_ids.contains(id) {
                if let Some(record) = self.actions_by_id.get(id) {
                    acc.merge(&record.payload);
                }
            }
            computed.push(Arc::new(acc.clone()));
        }
        self.computed_states = computed;
    }

    /// Check the length and key-set invariants
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violation.
    pub fn validate(&self) -> CoreResult<()> {
        if self.computed_states.len() != self.staged_action_ids.len() {
            return Err(CoreError::Validation {
                field: "computed_states".to_string(),
                reason: format!(
                    "{} computed states for {} staged actions",
                    self.computed_states.len(),
                    self.staged_action_ids.len()
                ),
            });
        }
        for (i, state) in self.computed_states.iter().enumerate() {
            let same_keys = state.previous_state.len() == state.next_state.len()
                && state
                    .previous_state
                    .keys()
                    .all(|key| state.next_state.contains_key(key));
            if !same_keys {
                return Err(CoreError::Validation {
                    field: "computed_states".to_string(),
                    reason: format!("state {} has mismatched previous/next keys", i),
                });
            }
        }
        for id in &self.staged_action_ids {
            if !self.actions_by_id.contains_key(id) {
                return Err(CoreError::UnknownAction { id: id.as_u64() });
            }
            if *id >= self.next_action_id {
                return Err(CoreError::Validation {
                    field: "next_action_id".to_string(),
                    reason: format!("staged id {} not below counter {}", id, self.next_action_id),
                });
            }
        }
        Ok(())
    }
}

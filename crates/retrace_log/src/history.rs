//! History controller.
//!
//! Owns the action log and the cursor, and applies history commands to them.
//! In `Recording` mode only commit and jump do anything; rollback, sweep,
//! reset and toggle answer `NotImplemented` and leave the log untouched.
//! `TimeTravel` mode gives them real semantics.

use crate::accumulator::RecordedTransaction;
use crate::cursor::HistoryCursor;
use crate::log::ActionLog;
use crate::transition::StateTransition;
use crate::view::LogView;
use retrace_core::{ActionId, CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// How history commands behave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Record and commit only
    #[default]
    Recording,
    /// Rollback, sweep, reset and skip toggling are live
    TimeTravel,
}

/// A user-triggered history operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HistoryCommand {
    /// Hide everything before the last staged entry
    Commit,
    /// Discard actions after the committed baseline
    Rollback,
    /// Remove skipped actions
    Sweep,
    /// Return to an empty session
    Reset,
    /// Skip or unskip one action
    ToggleAction {
        /// Target action
        action_id: ActionId,
    },
    /// Highlight an entry of the active window
    JumpToState {
        /// Index into the active window
        index: usize,
    },
}

impl HistoryCommand {
    /// Short name for logs and status lines
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Rollback => "rollback",
            Self::Sweep => "sweep",
            Self::Reset => "reset",
            Self::ToggleAction { .. } => "toggle",
            Self::JumpToState { .. } => "jump",
        }
    }

    /// Whether the command is live in `mode`
    #[must_use]
    pub const fn is_supported(&self, mode: HistoryMode) -> bool {
        match self {
            Self::Commit | Self::JumpToState { .. } => true,
            Self::Rollback | Self::Sweep | Self::Reset | Self::ToggleAction { .. } => {
                matches!(mode, HistoryMode::TimeTravel)
            }
        }
    }
}

impl std::fmt::Display for HistoryCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToggleAction { action_id } => write!(f, "toggle {}", action_id),
            Self::JumpToState { index } => write!(f, "jump {}", index),
            other => f.write_str(other.name()),
        }
    }
}

/// What a history command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Cursor moved
    Committed {
        /// New cursor position
        current_initial_idx: usize,
    },
    /// Tail discarded
    RolledBack {
        /// Action whose state is now the latest, if any
        baseline: Option<ActionId>,
        /// Discarded ids
        removed: Vec<ActionId>,
    },
    /// Skipped actions removed
    Swept {
        /// Removed ids
        removed: Vec<ActionId>,
    },
    /// Session cleared
    Reset {
        /// Every id that was staged
        removed: Vec<ActionId>,
    },
    /// Skip flag flipped
    Toggled {
        /// Target action
        action_id: ActionId,
        /// Flag after the toggle
        skipped: bool,
    },
    /// Highlight moved
    Jumped {
        /// Index into the active window
        index: usize,
    },
    /// Command is inert in the current mode; nothing changed
    NotImplemented {
        /// The command that was ignored
        command: HistoryCommand,
    },
}

impl CommandOutcome {
    /// Ids that left the log
    #[must_use]
    pub fn removed(&self) -> &[ActionId] {
        match self {
            Self::RolledBack { removed, .. } | Self::Swept { removed } | Self::Reset { removed } => {
                removed
            }
            _ => &[],
        }
    }

    /// False only for `NotImplemented`
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::NotImplemented { .. })
    }
}

/// Log plus cursor, mutated only through `record` and `apply`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryController {
    log: ActionLog,
    cursor: HistoryCursor,
    /// Entry the last commit landed on; `None` if it found an empty log
    baseline: Option<ActionId>,
    current_state_index: usize,
    mode: HistoryMode,
}

impl HistoryController {
    /// Create an empty controller
    #[must_use]
    pub fn new(mode: HistoryMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Command mode
    #[must_use]
    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Underlying log
    #[must_use]
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Underlying cursor
    #[must_use]
    pub fn cursor(&self) -> &HistoryCursor {
        &self.cursor
    }

    /// Absolute index of the highlighted entry
    #[must_use]
    pub fn current_state_index(&self) -> usize {
        self.current_state_index
    }

    /// Cumulative state to seed the next transaction from
    #[must_use]
    pub fn seed(&self) -> StateTransition {
        self.log.latest_state().cloned().unwrap_or_default()
    }

    /// Append a folded transaction under `label`
    pub fn record(&mut self, recorded: RecordedTransaction, label: &str) -> ActionId {
        let changed = recorded.payload.len();
        let action_id = self.log.append(recorded.payload, recorded.cumulative, label);
        self.current_state_index = self.log.len() - 1;
        tracing::debug!(action = %action_id, changed, staged = self.log.len(), "action recorded");
        action_id
    }

    /// Apply a history command
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownAction` for a toggle of an id that is not
    /// staged, and `CoreError::IndexOutOfRange` for a jump outside the
    /// active window.
    pub fn apply(&mut self, command: HistoryCommand) -> CoreResult<CommandOutcome> {
        if !command.is_supported(self.mode) {
            return Ok(CommandOutcome::NotImplemented { command });
        }
        let outcome = match command {
            HistoryCommand::Commit => self.commit(),
            HistoryCommand::Rollback => self.rollback(),
            HistoryCommand::Sweep => self.sweep(),
            HistoryCommand::Reset => self.reset(),
            HistoryCommand::ToggleAction { action_id } => self.toggle_action(action_id)?,
            HistoryCommand::JumpToState { index } => self.jump_to_state(index)?,
        };
        tracing::debug!(%command, ?outcome, "history command applied");
        Ok(outcome)
    }

    fn commit(&mut self) -> CommandOutcome {
        self.baseline = self.log.staged_action_ids().last().copied();
        let current_initial_idx = self.cursor.commit(self.log.len());
        self.current_state_index = self.current_state_index.max(current_initial_idx);
        CommandOutcome::Committed {
            current_initial_idx,
        }
    }

    fn rollback(&mut self) -> CommandOutcome {
        // A baseline swept since the commit no longer counts.
        let committed = self
            .baseline
            .and_then(|id| self.log.position(id).map(|pos| (pos, id)));
        let (keep, baseline) = match committed {
            Some((pos, id)) => (pos + 1, Some(id)),
            None => (self.cursor.pos(), None),
        };
        let removed = self.log.truncate(keep);
        self.settle();
        CommandOutcome::RolledBack { baseline, removed }
    }

    fn sweep(&mut self) -> CommandOutcome {
        let swept = self.log.sweep();
        let before_cursor = swept
            .iter()
            .filter(|(pos, _)| *pos < self.cursor.pos())
            .count();
        self.cursor.shift_left(before_cursor);
        self.settle();
        CommandOutcome::Swept {
            removed: swept.into_iter().map(|(_, id)| id).collect(),
        }
    }

    fn reset(&mut self) -> CommandOutcome {
        let removed = self.log.staged_action_ids().to_vec();
        self.log = ActionLog::new();
        self.cursor.reset();
        self.baseline = None;
        self.current_state_index = 0;
        CommandOutcome::Reset { removed }
    }

    fn toggle_action(&mut self, action_id: ActionId) -> CoreResult<CommandOutcome> {
        let skipped = self.log.toggle(action_id)?;
        Ok(CommandOutcome::Toggled { action_id, skipped })
    }

    fn jump_to_state(&mut self, index: usize) -> CoreResult<CommandOutcome> {
        let len = self.cursor.window(self.log.staged_action_ids()).len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        self.current_state_index = self.cursor.pos() + index;
        Ok(CommandOutcome::Jumped { index })
    }

    fn settle(&mut self) {
        self.cursor.clamp(self.log.len());
        self.current_state_index = self.log.len().saturating_sub(1);
    }

    /// Read-only view for rendering
    #[must_use]
    pub fn view(&self) -> LogView {
        LogView::build(&self.log, &self.cursor, self.current_state_index, self.mode)
    }
}

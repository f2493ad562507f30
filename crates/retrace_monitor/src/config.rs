//! Monitor configuration.
//!
//! The presentation options (`theme`, `expand_*`, `mark_state_diff`,
//! `hide_main_buttons`, `select`) are carried through untouched for the
//! rendering layer; the session only reads `values`, `history_mode`,
//! `action_label`, `read_timeout_ms`, `max_snapshots` and `channel_capacity`.

use retrace_core::ObservedValue;
use retrace_log::{DEFAULT_ACTION_LABEL, HistoryMode, StateMap, StateTransition};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Projection applied to a state before display
pub type Selector = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

fn identity_selector() -> Selector {
    Arc::new(|state: &Value| state.clone())
}

/// Monitor configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Explicit values to diff; `None` or empty scans modified nodes
    pub values: Option<Vec<ObservedValue>>,
    /// Display projection, identity by default
    #[serde(skip, default = "identity_selector")]
    pub select: Selector,
    /// Theme name
    pub theme: String,
    /// Expand the action tree by default
    pub expand_action_root: bool,
    /// Expand the state tree by default
    pub expand_state_root: bool,
    /// Mark keys whose value changed
    pub mark_state_diff: bool,
    /// Hide the commit/rollback/sweep/reset bar
    pub hide_main_buttons: bool,
    /// History command semantics
    pub history_mode: HistoryMode,
    /// Label recorded on each action
    pub action_label: String,
    /// Per-read timeout in milliseconds; `None` waits forever
    pub read_timeout_ms: Option<u64>,
    /// Snapshot handles kept for restoration; `None` keeps all
    pub max_snapshots: Option<usize>,
    /// Capacity of the session inbox
    pub channel_capacity: usize,
}

impl MonitorConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: None,
            select: identity_selector(),
            theme: "ulisesjcf".to_string(),
            expand_action_root: true,
            expand_state_root: true,
            mark_state_diff: false,
            hide_main_buttons: false,
            history_mode: HistoryMode::Recording,
            action_label: DEFAULT_ACTION_LABEL.to_string(),
            read_timeout_ms: None,
            max_snapshots: None,
            channel_capacity: 256,
        }
    }

    /// Diff only these values
    #[must_use]
    pub fn with_values(mut self, values: Vec<ObservedValue>) -> Self {
        self.values = Some(values);
        self
    }

    /// Set the display projection
    #[must_use]
    pub fn with_select<F>(mut self, select: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.select = Arc::new(select);
        self
    }

    /// Set the theme name
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the history mode
    #[must_use]
    pub fn with_history_mode(mut self, mode: HistoryMode) -> Self {
        self.history_mode = mode;
        self
    }

    /// Set the action label
    #[must_use]
    pub fn with_action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = label.into();
        self
    }

    /// Bound each snapshot read
    #[must_use]
    pub fn with_read_timeout(mut self, timeout_ms: u64) -> Self {
        self.read_timeout_ms = Some(timeout_ms);
        self
    }

    /// Bound the snapshot registry
    #[must_use]
    pub fn with_max_snapshots(mut self, max: usize) -> Self {
        self.max_snapshots = Some(max);
        self
    }

    /// Mark changed keys
    #[must_use]
    pub fn with_state_diff(mut self) -> Self {
        self.mark_state_diff = true;
        self
    }

    /// Hide the button bar
    #[must_use]
    pub fn without_buttons(mut self) -> Self {
        self.hide_main_buttons = true;
        self
    }

    /// Values to diff, if an explicit non-empty list was given
    #[must_use]
    pub fn explicit_values(&self) -> Option<&[ObservedValue]> {
        self.values.as_deref().filter(|values| !values.is_empty())
    }

    /// Per-read timeout
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Apply `select` to one side of a transition
    #[must_use]
    pub fn project(&self, side: &StateMap) -> Value {
        (self.select)(&StateTransition::side_as_value(side))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("values", &self.values)
            .field("theme", &self.theme)
            .field("expand_action_root", &self.expand_action_root)
            .field("expand_state_root", &self.expand_state_root)
            .field("mark_state_diff", &self.mark_state_diff)
            .field("hide_main_buttons", &self.hide_main_buttons)
            .field("history_mode", &self.history_mode)
            .field("action_label", &self.action_label)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("max_snapshots", &self.max_snapshots)
            .field("channel_capacity", &self.channel_capacity)
            .finish_non_exhaustive()
    }
}

//! Plain-text and JSON rendering of a finished session.

use retrace_log::{CommandOutcome, LogView, StateTransition};
use retrace_monitor::MonitorConfig;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Everything printed after a script has been played
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Session that recorded the log
    pub session: String,
    /// Final log view
    pub view: &'a LogView,
    /// Outcome of each command step
    pub outcomes: &'a [CommandOutcome],
}

impl Report<'_> {
    /// Pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable listing of the active window
    #[must_use]
    pub fn to_text(&self, config: &MonitorConfig) -> String {
        let view = self.view;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  mode={:?}  recorded={}  active={}  cursor={}",
            self.session,
            view.history_mode,
            view.actions_by_id.len(),
            view.len(),
            view.current_initial_idx,
        );

        for entry in view.entries() {
            let marker = if entry.selected { '>' } else { ' ' };
            let skipped = if entry.skipped { " (skipped)" } else { "" };
            let changed = entry.action.payload.changed_keys();
            let changed = changed
                .iter()
                .map(|key| key.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "{marker} {} {}{skipped}  [{changed}]",
                entry.action.action_id, entry.action.kind
            );
            if config.expand_state_root {
                render_state(&mut out, config, entry.state, &entry.action.payload);
            }
        }

        if !self.outcomes.is_empty() {
            let outcomes = self
                .outcomes
                .iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join("; ");
            let _ = writeln!(out, "commands: {outcomes}");
        }
        out
    }
}

fn render_state(
    out: &mut String,
    config: &MonitorConfig,
    state: &StateTransition,
    payload: &StateTransition,
) {
    match config.project(&state.next_state) {
        Value::Object(map) => {
            for (key, value) in map {
                let mark = if config.mark_state_diff && payload.is_changed(&key) {
                    '*'
                } else {
                    ' '
                };
                let _ = writeln!(out, "   {mark}{key}: {value}");
            }
        }
        other => {
            let _ = writeln!(out, "    {other}");
        }
    }
}

/// One-line summary of a command outcome
#[must_use]
pub fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Committed { current_initial_idx } => {
            format!("committed at {current_initial_idx}")
        }
        CommandOutcome::RolledBack { baseline, removed } => match baseline {
            Some(id) => format!("rolled back to {id}, removed {}", removed.len()),
            None => format!("rolled back, removed {}", removed.len()),
        },
        CommandOutcome::Swept { removed } => format!("swept {}", removed.len()),
        CommandOutcome::Reset { removed } => format!("reset, removed {}", removed.len()),
        CommandOutcome::Toggled { action_id, skipped } => {
            format!("{action_id} skipped={skipped}")
        }
        CommandOutcome::Jumped { index } => format!("jumped to {index}"),
        CommandOutcome::NotImplemented { command } => format!("{command} not implemented"),
    }
}

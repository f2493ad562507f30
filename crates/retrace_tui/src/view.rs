//! Entry list and button bar models.
//!
//! Rows are built from a `LogView` without touching the terminal so they
//! can be tested directly; `render_*` turns them into ratatui widgets.

use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use retrace_core::ActionId;
use retrace_log::{HistoryCommand, LogView, StateTransition};
use retrace_monitor::MonitorConfig;
use serde_json::Value;
use unicode_width::UnicodeWidthChar;

/// One button of the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    /// Caption
    pub label: &'static str,
    /// Command dispatched on press
    pub command: HistoryCommand,
    /// Whether the press does anything useful
    pub enabled: bool,
}

/// Reset, Revert, Sweep and Commit, in display order
#[must_use]
pub fn button_bar(view: &LogView) -> [Button; 4] {
    let has_states = view.has_states();
    [
        Button {
            label: "Reset",
            command: HistoryCommand::Reset,
            enabled: true,
        },
        Button {
            label: "Revert",
            command: HistoryCommand::Rollback,
            enabled: has_states,
        },
        Button {
            label: "Sweep",
            command: HistoryCommand::Sweep,
            enabled: view.has_skipped_actions(),
        },
        Button {
            label: "Commit",
            command: HistoryCommand::Commit,
            enabled: has_states,
        },
    ]
}

/// Draw the button bar
pub fn render_buttons(f: &mut Frame, area: Rect, buttons: &[Button], theme: &Theme) {
    let spans: Vec<Span> = buttons
        .iter()
        .flat_map(|button| {
            [
                Span::styled(format!(" {} ", button.label), theme.button(button.enabled)),
                Span::raw(" "),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.panel()), area);
}

/// One key of an entry's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLine {
    /// Key
    pub key: String,
    /// Compact JSON value
    pub value: String,
    /// Marked as changed by this entry
    pub changed: bool,
}

/// One entry of the active window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    /// Index in the active window
    pub index: usize,
    /// Action id
    pub action_id: ActionId,
    /// Action label
    pub label: String,
    /// Keys the action changed, shown when the action root is expanded
    pub changed_keys: Vec<String>,
    /// Skipped flag
    pub skipped: bool,
    /// Highlighted entry
    pub selected: bool,
    /// Projected state, empty when the state root is collapsed
    pub state: Vec<StateLine>,
}

impl EntryRow {
    /// Lines this row occupies
    #[must_use]
    pub fn height(&self) -> usize {
        1 + self.state.len()
    }
}

/// Rows of the entry list
#[derive(Debug, Clone, Default)]
pub struct EntryListView {
    rows: Vec<EntryRow>,
}

impl EntryListView {
    /// Build rows from `view`
    ///
    /// `expand_state` overrides `config.expand_state_root` at runtime.
    #[must_use]
    pub fn build(view: &LogView, config: &MonitorConfig, expand_state: bool) -> Self {
        let rows = view
            .entries()
            .map(|entry| {
                let changed_keys = if config.expand_action_root {
                    entry
                        .action
                        .payload
                        .changed_keys()
                        .into_iter()
                        .map(ToString::to_string)
                        .collect()
                } else {
                    Vec::new()
                };
                let state = if expand_state {
                    state_lines(config, entry.state, &entry.action.payload)
                } else {
                    Vec::new()
                };
                EntryRow {
                    index: entry.index,
                    action_id: entry.action.action_id,
                    label: entry.action.kind.clone(),
                    changed_keys,
                    skipped: entry.skipped,
                    selected: entry.selected,
                    state,
                }
            })
            .collect();
        Self { rows }
    }

    /// Rows in window order
    #[must_use]
    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rows.len()
    }

    /// Highlighted row, if any
    #[must_use]
    pub fn selected(&self) -> Option<&EntryRow> {
        self.rows.iter().find(|row| row.selected)
    }

    /// First line of the highlighted row
    #[must_use]
    pub fn selected_line(&self) -> usize {
        self.rows
            .iter()
            .take_while(|row| !row.selected)
            .map(EntryRow::height)
            .sum()
    }

    /// Styled lines, clipped to `width` columns
    #[must_use]
    pub fn lines(&self, theme: &Theme, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for row in &self.rows {
            let label_style = if row.skipped {
                theme.skipped()
            } else {
                theme.label()
            };
            let mut header = format!("{} {}", row.action_id, row.label);
            if !row.changed_keys.is_empty() {
                header.push_str(&format!("  [{}]", row.changed_keys.join(", ")));
            }
            let mut line = Line::from(Span::styled(clip(&header, width), label_style));
            if row.selected {
                line = line.patch_style(theme.selected());
            }
            lines.push(line);

            for state in &row.state {
                let mark = if state.changed { "* " } else { "  " };
                let key = format!("  {mark}{}: ", state.key);
                let value_width = width.saturating_sub(display_width(&key));
                let value_style = if state.changed {
                    theme.changed()
                } else {
                    theme.panel()
                };
                lines.push(Line::from(vec![
                    Span::styled(clip(&key, width), theme.key()),
                    Span::styled(clip(&state.value, value_width), value_style),
                ]));
            }
        }
        lines
    }

    /// Draw the list, scrolled so the highlighted row is visible
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let height = usize::from(area.height);
        let scroll = if height == 0 {
            0
        } else {
            self.selected_line().saturating_sub(height - 1)
        };
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
        let paragraph = Paragraph::new(self.lines(theme, usize::from(area.width)))
            .style(theme.panel())
            .scroll((scroll, 0));
        f.render_widget(paragraph, area);
    }
}

fn state_lines(
    config: &MonitorConfig,
    state: &StateTransition,
    payload: &StateTransition,
) -> Vec<StateLine> {
    match config.project(&state.next_state) {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| StateLine {
                changed: config.mark_state_diff && payload.is_changed(&key),
                key,
                value: value.to_string(),
            })
            .collect(),
        other => vec![StateLine {
            key: "state".to_string(),
            value: other.to_string(),
            changed: false,
        }],
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
fn clip(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrace_core::ObservedValue;
    use retrace_log::{HistoryController, HistoryMode, TransactionAccumulator};
    use serde_json::json;

    fn history(steps: &[(&str, Value)]) -> HistoryController {
        let mut history = HistoryController::new(HistoryMode::TimeTravel);
        for (key, next) in steps {
            let seed = history.seed();
            let previous = seed.next_state.get(*key).cloned().unwrap_or(Value::Null);
            let mut acc = TransactionAccumulator::seeded(&seed);
            acc.fold(&ObservedValue::new(*key).unwrap(), previous, next.clone());
            history.record(acc.finish(), "Updated state");
        }
        history
    }

    #[test]
    fn test_button_enablement() {
        let empty = button_bar(&LogView::default());
        assert!(empty[0].enabled);
        assert!(!empty[1].enabled);
        assert!(!empty[2].enabled);
        assert!(!empty[3].enabled);

        let mut history = history(&[("a", json!(1))]);
        history
            .apply(HistoryCommand::ToggleAction { action_id: ActionId::from_raw(0) })
            .unwrap();
        let buttons = button_bar(&history.view());
        assert!(buttons.iter().all(|b| b.enabled));
        assert_eq!(buttons[2].command, HistoryCommand::Sweep);
    }

    #[test]
    fn test_rows_follow_window() {
        let history = history(&[("a", json!(1)), ("b", json!(2))]);
        let list = EntryListView::build(&history.view(), &MonitorConfig::default(), true);

        assert_eq!(list.item_count(), 2);
        let last = &list.rows()[1];
        assert!(last.selected);
        assert_eq!(last.changed_keys, vec!["b".to_string()]);
        assert_eq!(last.state.len(), 2);
        assert_eq!(list.selected_line(), 2);
    }

    #[test]
    fn test_collapsed_rows() {
        let history = history(&[("a", json!(1))]);
        let mut config = MonitorConfig::default();
        config.expand_action_root = false;
        let list = EntryListView::build(&history.view(), &config, false);

        let row = &list.rows()[0];
        assert!(row.changed_keys.is_empty());
        assert!(row.state.is_empty());
        assert_eq!(row.height(), 1);
    }

    #[test]
    fn test_mark_state_diff() {
        let history = history(&[("a", json!(1)), ("b", json!(2))]);
        let view = history.view();

        let plain = EntryListView::build(&view, &MonitorConfig::default(), true);
        assert!(plain.rows()[1].state.iter().all(|line| !line.changed));

        let marked = EntryListView::build(&view, &MonitorConfig::new().with_state_diff(), true);
        let changed: Vec<&str> = marked.rows()[1]
            .state
            .iter()
            .filter(|line| line.changed)
            .map(|line| line.key.as_str())
            .collect();
        assert_eq!(changed, vec!["b"]);
    }

    #[test]
    fn test_select_projection_applies() {
        let history = history(&[("count", json!(3))]);
        let config = MonitorConfig::new().with_select(|state| state["count"].clone());
        let list = EntryListView::build(&history.view(), &config, true);
        assert_eq!(
            list.rows()[0].state,
            vec![StateLine {
                key: "state".to_string(),
                value: "3".to_string(),
                changed: false,
            }]
        );
    }

    #[test]
    fn test_lines_skipped_style() {
        let mut history = history(&[("a", json!(1))]);
        history
            .apply(HistoryCommand::ToggleAction { action_id: ActionId::from_raw(0) })
            .unwrap();
        let theme = Theme::default();
        let list = EntryListView::build(&history.view(), &MonitorConfig::default(), false);
        let lines = list.lines(&theme, 40);
        assert_eq!(lines.len(), 1);
        assert!(list.rows()[0].skipped);
        assert_eq!(lines[0].spans[0].style.fg, theme.skipped().fg);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("hello", 10), "hello");
        assert_eq!(clip("hello world", 6), "hello…");
        assert_eq!(clip("日本語", 4), "日…");
        assert_eq!(clip("abc", 0), "");
    }
}

//! Interactive log monitor panel.

use crate::input::{InputError, InputEvent, InputHandler};
use crate::layout::PanelLayout;
use crate::theme::Theme;
use crate::view::{EntryListView, button_bar, render_buttons};
use ratatui::{
    Frame,
    backend::CrosstermBackend,
    crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use retrace_log::{CommandOutcome, HistoryCommand, LogView};
use retrace_monitor::{MonitorError, MonitorEvent, MonitorHandle};
use tokio::sync::broadcast;

/// TUI errors
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// Terminal error
    #[error("terminal error: {0}")]
    Terminal(String),
    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),
    /// Monitor error
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

/// Command a key press maps to, given the current view
///
/// Navigation becomes `JumpToState`; button keys are dropped when the bar
/// is hidden.
#[must_use]
pub fn command_for(event: InputEvent, view: &LogView, buttons_visible: bool) -> Option<HistoryCommand> {
    let len = view.len();
    let current = view.current_state_index.min(len.saturating_sub(1));
    let jump = |index: usize| (len > 0).then_some(HistoryCommand::JumpToState { index });
    match event {
        InputEvent::Down => jump((current + 1).min(len.saturating_sub(1))),
        InputEvent::Up => jump(current.saturating_sub(1)),
        InputEvent::GoTop => jump(0),
        InputEvent::GoBottom => jump(len.saturating_sub(1)),
        InputEvent::Toggle => view
            .staged_action_ids
            .get(current)
            .map(|&action_id| HistoryCommand::ToggleAction { action_id }),
        InputEvent::Commit if buttons_visible => Some(HistoryCommand::Commit),
        InputEvent::Rollback if buttons_visible => Some(HistoryCommand::Rollback),
        InputEvent::Sweep if buttons_visible => Some(HistoryCommand::Sweep),
        InputEvent::Reset if buttons_visible => Some(HistoryCommand::Reset),
        _ => None,
    }
}

/// Status text for a command result
#[must_use]
pub fn status_for(command: HistoryCommand, result: &Result<CommandOutcome, MonitorError>) -> String {
    match result {
        Ok(CommandOutcome::NotImplemented { .. }) => format!("{command}: not implemented"),
        Ok(CommandOutcome::Committed { current_initial_idx }) => {
            format!("committed at {current_initial_idx}")
        }
        Ok(CommandOutcome::RolledBack { removed, .. }) => format!("reverted {} actions", removed.len()),
        Ok(CommandOutcome::Swept { removed }) => format!("swept {} actions", removed.len()),
        Ok(CommandOutcome::Reset { removed }) => format!("reset {} actions", removed.len()),
        Ok(CommandOutcome::Toggled { action_id, skipped }) => {
            if *skipped {
                format!("skipped {action_id}")
            } else {
                format!("restored {action_id}")
            }
        }
        Ok(CommandOutcome::Jumped { .. }) => String::new(),
        Err(err) => format!("{command}: {err}"),
    }
}

/// Monitor panel bound to a running session
pub struct MonitorApp {
    handle: MonitorHandle,
    events: broadcast::Receiver<MonitorEvent>,
    theme: Theme,
    input: InputHandler,
    layout: PanelLayout,
    expand_state: bool,
    show_help: bool,
    should_quit: bool,
    status: String,
}

impl MonitorApp {
    /// Create a panel for `handle`, resolving the configured theme
    #[must_use]
    pub fn new(handle: MonitorHandle) -> Self {
        let config = handle.config();
        let theme = Theme::resolve(&config.theme);
        let expand_state = config.expand_state_root;
        Self {
            events: handle.events(),
            handle,
            theme,
            input: InputHandler::new(),
            layout: PanelLayout::new(),
            expand_state,
            show_help: false,
            should_quit: false,
            status: "Ready".to_string(),
        }
    }

    /// Current status text
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Run until the user quits
    ///
    /// # Errors
    ///
    /// Returns error if terminal setup or teardown fails
    pub async fn run(&mut self) -> Result<(), TuiError> {
        enable_raw_mode().map_err(|e| TuiError::Terminal(e.to_string()))?;
        execute!(std::io::stdout(), EnterAlternateScreen)
            .map_err(|e| TuiError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(std::io::stdout());
        let mut terminal =
            ratatui::Terminal::new(backend).map_err(|e| TuiError::Terminal(e.to_string()))?;

        let result = self.run_inner(&mut terminal).await;

        disable_raw_mode().map_err(|e| TuiError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| TuiError::Terminal(e.to_string()))?;

        result
    }

    async fn run_inner(
        &mut self,
        terminal: &mut ratatui::Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), TuiError> {
        loop {
            self.drain_events();
            let view = self.handle.view();
            terminal
                .draw(|f| self.draw(f, &view))
                .map_err(|e| TuiError::Terminal(e.to_string()))?;

            // Crossterm polling blocks; keep it off the async workers.
            let event = tokio::task::block_in_place(|| self.input.next_event())?;
            if let Some(event) = event {
                self.handle_event(event, &view).await;
            }
            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply one input event
    pub async fn handle_event(&mut self, event: InputEvent, view: &LogView) {
        match event {
            InputEvent::Quit => self.should_quit = true,
            InputEvent::Help => self.show_help = !self.show_help,
            InputEvent::ExpandState => self.expand_state = !self.expand_state,
            other => {
                let visible = !self.handle.config().hide_main_buttons;
                if let Some(command) = command_for(other, view, visible) {
                    let result = self.handle.apply(command).await;
                    let status = status_for(command, &result);
                    if !status.is_empty() {
                        self.status = status;
                    }
                }
            }
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(MonitorEvent::TransactionFailed { reason }) => {
                    self.status = format!("transaction dropped: {reason}");
                }
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "status events lagged");
                }
                Err(_) => break,
            }
        }
    }

    fn draw(&self, f: &mut Frame, view: &LogView) {
        let config = self.handle.config();
        let areas = self.layout.calculate(f.area(), !config.hide_main_buttons);

        if let Some(area) = areas.buttons {
            render_buttons(f, area, &button_bar(view), &self.theme);
        }
        if self.show_help {
            self.render_help(f, areas.entries);
        } else {
            EntryListView::build(view, config, self.expand_state).render(
                f,
                areas.entries,
                &self.theme,
            );
        }

        let status = format!(
            " {:?} | {}/{} | {} | ? for help",
            view.history_mode,
            (view.current_state_index + 1).min(view.len()),
            view.len(),
            self.status
        );
        f.render_widget(Paragraph::new(status).style(self.theme.label()), areas.status);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = vec![
            Line::from("  j/↓ k/↑   move highlight"),
            Line::from("  g/G       first / last entry"),
            Line::from("  space     skip or unskip action"),
            Line::from("  enter     expand or collapse state"),
            Line::from("  c         commit"),
            Line::from("  v         revert"),
            Line::from("  s         sweep"),
            Line::from("  R         reset"),
            Line::from("  q         quit"),
        ];
        let paragraph = Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .style(self.theme.panel())
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

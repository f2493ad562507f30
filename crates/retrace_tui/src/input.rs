//! Keyboard input and key bindings for the monitor panel.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// Input event from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the panel
    Quit,
    /// Show or hide key help
    Help,
    /// Move the highlight down
    Down,
    /// Move the highlight up
    Up,
    /// Highlight the first entry
    GoTop,
    /// Highlight the last entry
    GoBottom,
    /// Skip or unskip the highlighted action
    Toggle,
    /// Expand or collapse the state of each entry
    ExpandState,
    /// Commit button
    Commit,
    /// Revert button
    Rollback,
    /// Sweep button
    Sweep,
    /// Reset button
    Reset,
    /// Unknown key
    Unknown,
}

/// Key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub code: KeyCode,
    /// Modifiers (ctrl, alt, shift)
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    /// Create a new key combination
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a plain key without modifiers
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a Ctrl+key combination
    #[must_use]
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    bindings: HashMap<KeyCombo, InputEvent>,
}

impl KeyBinding {
    /// Bind `combo` to `event`, replacing any previous binding
    #[must_use]
    pub fn with(mut self, combo: KeyCombo, event: InputEvent) -> Self {
        self.bindings.insert(combo, event);
        self
    }

    /// Event bound to `combo`
    #[must_use]
    pub fn get(&self, combo: &KeyCombo) -> Option<InputEvent> {
        self.bindings.get(combo).copied()
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Navigation
        bindings.insert(KeyCombo::key(KeyCode::Down), InputEvent::Down);
        bindings.insert(KeyCombo::key(KeyCode::Char('j')), InputEvent::Down);
        bindings.insert(KeyCombo::key(KeyCode::Up), InputEvent::Up);
        bindings.insert(KeyCombo::key(KeyCode::Char('k')), InputEvent::Up);
        bindings.insert(KeyCombo::key(KeyCode::Char('g')), InputEvent::GoTop);
        bindings.insert(KeyCombo::key(KeyCode::Home), InputEvent::GoTop);
        bindings.insert(KeyCombo::key(KeyCode::Char('G')), InputEvent::GoBottom);
        bindings.insert(KeyCombo::new(KeyCode::Char('G'), KeyModifiers::SHIFT), InputEvent::GoBottom);
        bindings.insert(KeyCombo::key(KeyCode::End), InputEvent::GoBottom);

        // Entries
        bindings.insert(KeyCombo::key(KeyCode::Char(' ')), InputEvent::Toggle);
        bindings.insert(KeyCombo::key(KeyCode::Enter), InputEvent::ExpandState);

        // Button bar
        bindings.insert(KeyCombo::key(KeyCode::Char('c')), InputEvent::Commit);
        bindings.insert(KeyCombo::key(KeyCode::Char('v')), InputEvent::Rollback);
        bindings.insert(KeyCombo::key(KeyCode::Char('s')), InputEvent::Sweep);
        bindings.insert(KeyCombo::key(KeyCode::Char('R')), InputEvent::Reset);
        bindings.insert(KeyCombo::new(KeyCode::Char('R'), KeyModifiers::SHIFT), InputEvent::Reset);

        bindings.insert(KeyCombo::key(KeyCode::Char('?')), InputEvent::Help);

        // Quit
        bindings.insert(KeyCombo::key(KeyCode::Char('q')), InputEvent::Quit);
        bindings.insert(KeyCombo::key(KeyCode::Esc), InputEvent::Quit);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('c')), InputEvent::Quit);

        Self { bindings }
    }
}

/// Input handler for terminal events
pub struct InputHandler {
    bindings: KeyBinding,
    timeout: Duration,
}

impl InputHandler {
    /// Create a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self::with_bindings(KeyBinding::default())
    }

    /// Create with custom key bindings
    #[must_use]
    pub fn with_bindings(bindings: KeyBinding) -> Self {
        Self {
            bindings,
            timeout: Duration::from_millis(100),
        }
    }

    /// Set poll timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the next input event, if a key was pressed within the timeout
    ///
    /// # Errors
    ///
    /// Returns error if reading from terminal fails
    pub fn next_event(&self) -> Result<Option<InputEvent>, InputError> {
        if crossterm::event::poll(self.timeout)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(self.map_key(key)));
                }
            }
        }
        Ok(None)
    }

    /// Map a KeyEvent to an InputEvent using key bindings
    #[must_use]
    pub fn map_key(&self, key: KeyEvent) -> InputEvent {
        let combo = KeyCombo::new(key.code, key.modifiers);
        self.bindings.get(&combo).unwrap_or(InputEvent::Unknown)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Input-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

//! History cursor marking the start of the active window.

use serde::{Deserialize, Serialize};

/// Boundary between committed and active log entries
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCursor {
    /// First staged position considered active
    pub current_initial_idx: usize,
    /// Cursor positions in effect before each commit
    pub commited_idxs: Vec<usize>,
}

impl HistoryCursor {
    /// Cursor at the start of an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.current_initial_idx
    }

    /// Archive the current position and move to the last staged entry
    ///
    /// On an empty log the cursor stays at zero.
    pub fn commit(&mut self, staged_len: usize) -> usize {
        self.commited_idxs.push(self.current_initial_idx);
        self.current_initial_idx = staged_len.saturating_sub(1);
        self.current_initial_idx
    }

    /// Shift left by the number of entries removed before the cursor
    pub fn shift_left(&mut self, removed_before: usize) {
        self.current_initial_idx = self.current_initial_idx.saturating_sub(removed_before);
    }

    /// Keep the cursor within `0..=staged_len`
    pub fn clamp(&mut self, staged_len: usize) {
        self.current_initial_idx = self.current_initial_idx.min(staged_len);
    }

    /// The active slice of a staged sequence
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.current_initial_idx..).unwrap_or(&[])
    }

    /// Back to a fresh session
    pub fn reset(&mut self) {
        self.current_initial_idx = 0;
        self.commited_idxs.clear();
    }
}

//! Screen areas of the monitor panel.

use ratatui::layout::Rect;

/// Splits the terminal into button bar, entry list and status line
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    button_height: u16,
    status_height: u16,
}

/// Areas computed for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAreas {
    /// Button bar, absent when hidden
    pub buttons: Option<Rect>,
    /// Entry list
    pub entries: Rect,
    /// Status line
    pub status: Rect,
}

impl PanelLayout {
    /// Create a layout with a one-line button bar and status line
    #[must_use]
    pub fn new() -> Self {
        Self {
            button_height: 1,
            status_height: 1,
        }
    }

    /// Set status line height
    #[must_use]
    pub fn with_status_height(mut self, height: u16) -> Self {
        self.status_height = height;
        self
    }

    /// Calculate areas for a terminal of `size`
    #[must_use]
    pub fn calculate(&self, size: Rect, show_buttons: bool) -> PanelAreas {
        let status_height = self.status_height.min(size.height);
        let button_height = if show_buttons {
            self.button_height.min(size.height - status_height)
        } else {
            0
        };
        let entries_height = size.height - status_height - button_height;

        let buttons = (button_height > 0).then(|| Rect {
            x: size.x,
            y: size.y,
            width: size.width,
            height: button_height,
        });
        let entries = Rect {
            x: size.x,
            y: size.y + button_height,
            width: size.width,
            height: entries_height,
        };
        let status = Rect {
            x: size.x,
            y: size.y + button_height + entries_height,
            width: size.width,
            height: status_height,
        };

        PanelAreas {
            buttons,
            entries,
            status,
        }
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new()
    }
}

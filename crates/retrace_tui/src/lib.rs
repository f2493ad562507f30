//! RETRACE TUI
//!
//! Terminal log monitor panel: button bar, entry list and status line over
//! a running monitor session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod input;
pub mod layout;
pub mod theme;
pub mod ui;
pub mod view;

pub use input::{InputError, InputEvent, InputHandler, KeyBinding, KeyCombo};
pub use layout::{PanelAreas, PanelLayout};
pub use theme::{DEFAULT_THEME, Theme};
pub use ui::{MonitorApp, TuiError, command_for, status_for};
pub use view::{Button, EntryListView, EntryRow, StateLine, button_bar};

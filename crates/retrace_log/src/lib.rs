//! RETRACE Action Log
//!
//! Records state transitions as an append-only ledger of actions and
//! exposes commit/rollback/sweep/reset over it. Everything here is
//! synchronous and owned; the monitor crate wraps it in a single-writer
//! session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod transition;
pub mod accumulator;
pub mod record;
pub mod log;
pub mod cursor;
pub mod history;
pub mod view;

pub use transition::{StateMap, StateTransition};
pub use accumulator::{RecordedTransaction, TransactionAccumulator};
pub use record::{ActionRecord, DEFAULT_ACTION_LABEL};
pub use log::ActionLog;
pub use cursor::HistoryCursor;
pub use history::{CommandOutcome, HistoryCommand, HistoryController, HistoryMode};
pub use view::{LogEntry, LogView};

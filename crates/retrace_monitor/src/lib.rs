//! RETRACE Monitor
//!
//! Observes host transactions, diffs their snapshots and records them into
//! an action log owned by a single-writer session task.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod events;
pub mod memory;
pub mod reader;
pub mod recorder;
pub mod registry;
pub mod script;
pub mod session;
pub mod subscription;

pub use config::{MonitorConfig, Selector};
pub use error::{AccessError, MonitorError, MonitorResult};
pub use events::MonitorEvent;
pub use memory::{MemorySnapshot, MemoryStore, ReadFault};
pub use reader::{SnapshotHandle, SnapshotReader, TransactionEvent};
pub use recorder::TransactionRecorder;
pub use registry::SnapshotRegistry;
pub use script::{Script, ScriptStep};
pub use session::{MonitorHandle, MonitorSession, SessionState};
pub use subscription::{TransactionSink, TransactionSource, Unsubscribe};

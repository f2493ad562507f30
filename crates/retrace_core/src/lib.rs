//! RETRACE Core Types
//!
//! Pure types shared by the log, the monitor session and the panels.
//! Nothing in this crate performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id;
pub mod key;

// Re-exports
pub use error::{CoreError, CoreResult};
pub use id::{ActionId, SessionId};
pub use key::{ObservedKey, ObservedValue};

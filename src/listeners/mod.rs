//! # Built-in synchronous listeners.
//!
//! Ready-made consumers that register on an [`EventBus`](crate::EventBus)
//! through their `attach` method.
//!
//! - **Stateful**: [`StatusTracker`] (latest session/engine status),
//!   [`ProjectTracker`] (per-project progress and error counts)
//! - **Passive**: [`LogWriter`] renders events through `tracing`
//!   (feature `logging`)
//!
//! ## Implementing custom listeners
//! Any `Fn(&E) + Send + Sync + 'static` closure is a listener:
//! ```rust
//! use pulsebus::{EventBus, ErrorKind};
//!
//! let bus = EventBus::new();
//! bus.on_error(|ev| {
//!     if ev.kind == ErrorKind::Auth {
//!         // prompt for credentials
//!     }
//! });
//! ```
//! A single channel carries several tags, so filtering by tag is the
//! listener's job.

mod projects;
mod status;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use projects::{ProjectState, ProjectTracker};
pub use status::{StatusSnapshot, StatusTracker};

//! Event bus: classification, registration and dispatch.
//!
//! ## Contents
//! - [`EventBus`] the single entry point for producers and listeners
//! - [`ListenerId`] handle returned by `subscribe_*`, used to unsubscribe
//! - [`ListenerCounts`] registration sizes for leak detection and tests
//! - `Registry` per-channel ordered listener list (internal)
//!
//! ## Quick reference
//! - **Producers** call `emit` / `emit_progress` / `emit_error` / `emit_status`
//!   or one of the `emit_<tag>` shorthands.
//! - **Listeners** register with `on_<channel>` (chainable) or
//!   `subscribe_<channel>` (returns a [`ListenerId`]).

mod event_bus;
mod registry;

pub use event_bus::{EventBus, ListenerCounts};
pub use registry::{Listener, ListenerId};

//! # Async subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for consumers that need to do
//! async work (network export, UI bridges, persistence) without blocking the
//! producer that emitted the event.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently on the tokio runtime)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use pulsebus::{Event, Subscribe};
//!
//! struct UiBridge;
//!
//! #[async_trait]
//! impl Subscribe for UiBridge {
//!     async fn on_event(&self, ev: &Event) {
//!         if let Event::Progress(p) = ev {
//!             let _ = p.progress();
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "ui-bridge" }
//!     fn queue_capacity(&self) -> usize { 256 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Async event consumer driven by a [`SubscriberSet`](crate::SubscriberSet).
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from the subscriber's worker task, in FIFO order. Events from all
    /// three channels arrive here; filter by variant if needed.
    async fn on_event(&self, event: &Event);

    /// Name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity (clamped to a minimum of 1).
    ///
    /// When the queue is full the new event is dropped for this subscriber
    /// only and a warning is logged.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}

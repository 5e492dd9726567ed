//! # pulsebus
//!
//! **pulsebus** is a typed, in-process publish/subscribe bus for download
//! tooling. Producers (a download engine, a session manager, validators)
//! report progress, errors and status transitions; any number of listeners
//! (UI layers, loggers, test harnesses) observe them without the producers
//! knowing who is listening.
//!
//! It is a fire-and-forget notification mechanism, not a message queue:
//! nothing is persisted, nothing crosses process boundaries, and there is no
//! back-pressure on producers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │DownloadEngine│   │SessionManager│   │  Validators  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ emit_download_   │ emit_session_    │ emit_validation_
//!            │ progress(..)     │ status(..)       │ error(..)
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventBus                                                         │
//! │  - classify by tag (EventTag → Channel)                           │
//! │  - unknown tag → warn!, return false                              │
//! │  - snapshot listeners, run them inline in registration order      │
//! └──────┬──────────────────────┬──────────────────────┬──────────────┘
//!        ▼                      ▼                      ▼
//!   progress channel        error channel        status channel
//!   project-start           validation-error     session-status
//!   download-progress       network-error        engine-status
//!   project-complete        auth-error
//!                           file-error
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//!   listeners: closures, ProjectTracker, StatusTracker, LogWriter,
//!              SubscriberSet (bridge to async Subscribe workers)
//! ```
//!
//! ### Dispatch
//! ```text
//! emit(event)
//!   ├─► Event::Progress / Error / Status ──► channel registry
//!   │       ├─ snapshot listeners (lock released before any listener runs)
//!   │       ├─ none registered      ─► return false
//!   │       └─ call each in order   ─► return true
//!   │            └─ listener panics ─► unwinds to the caller, rest skipped
//!   └─► Event::Unrecognized ──► reclassify by tag
//!           ├─ known tag, valid body ─► decoded and routed as above
//!           └─ otherwise             ─► one warn! naming the tag/error ─► return false
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types                                       |
//! |-------------------|----------------------------------------------------------|-------------------------------------------------|
//! | **Events**        | Closed tag set partitioned into three channels.          | [`Event`], [`EventTag`], [`Channel`]            |
//! | **Bus**           | Registration, dispatch, introspection.                   | [`EventBus`], [`ListenerId`], [`ListenerCounts`]|
//! | **Listeners**     | Ready-made trackers and a log writer.                    | [`StatusTracker`], [`ProjectTracker`]           |
//! | **Subscribers**   | Async consumers fed through bounded queues.              | [`Subscribe`], [`SubscriberSet`]                |
//! | **Errors**        | Typed errors for parsing and validation helpers.         | [`BusError`]                                    |
//! | **Configuration** | Leak-warning threshold, unknown-tag warnings.            | [`BusConfig`]                                   |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], which renders every event through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use pulsebus::{EventBus, Status, StatusTracker};
//!
//! let bus = EventBus::new();
//! let tracker = Arc::new(StatusTracker::new());
//! tracker.attach(&bus);
//!
//! bus.on_progress(|ev| {
//!     if let Some(p) = ev.progress() {
//!         println!("{} at {}%", ev.project_number(), p.percentage);
//!     }
//! })
//! .on_error(|ev| eprintln!("{}: {}", ev.kind.tag(), ev.message));
//!
//! bus.emit_engine_status(Status::Running, None);
//! bus.emit_download_progress("P-1", 3, 10, None);
//!
//! assert_eq!(tracker.engine(), Some(Status::Running));
//! assert_eq!(bus.listener_counts().total, 3);
//! ```
mod bus;
mod config;
mod error;
mod events;
mod listeners;
mod subscribers;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use bus::{EventBus, Listener, ListenerCounts, ListenerId};
pub use config::{BusConfig, DEFAULT_MAX_LISTENERS};
pub use error::BusError;
pub use events::{
    Channel, ErrorCause, ErrorEvent, ErrorKind, Event, EventTag, Progress, ProgressEvent,
    RawEvent, Status, StatusEvent, StatusKind,
};
pub use listeners::{ProjectState, ProjectTracker, StatusSnapshot, StatusTracker};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in log writer.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "logging")]
pub use listeners::LogWriter;

//! # The event bus.
//!
//! [`EventBus`] classifies events by tag, routes them to one of three channels
//! and runs that channel's listeners synchronously on the caller's thread.
//!
//! ## Architecture
//! ```text
//! Producers:                              Channels:
//!   DownloadEngine ──┐                      ┌──► progress ──► L1, L2, ...
//!   SessionManager ──┼──► emit(Event) ──────┼──► error    ──► L1, ...
//!   Validators     ──┘   (classify by tag)  └──► status   ──► L1, L2, L3, ...
//!                              │
//!                              └── unrecognized tag ──► warn!, return false
//! ```
//!
//! ## Rules
//! - **Synchronous**: all listeners have returned when `emit` returns.
//! - **Ordered**: listeners of a channel run in registration order.
//! - **Snapshot**: the listener set is fixed when a dispatch starts.
//! - **Soft fail on unknown tags**: logged, never panics, returns `false`.
//! - **Listener panics propagate** to the caller of `emit`; listeners after the
//!   panicking one are not invoked for that event.
//!
//! The `bool` returned by every emitter means "at least one listener ran". It
//! is `false` both for unknown tags and for channels with no listeners.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::bus::registry::{Listener, ListenerId, Registry};
use crate::config::BusConfig;
use crate::error::BusError;
use crate::events::{
    Channel, ErrorCause, ErrorEvent, ErrorKind, Event, ProgressEvent, RawEvent, Status,
    StatusEvent, StatusKind,
};

/// Registration sizes per channel.
///
/// `total` is always `progress + error + status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListenerCounts {
    pub progress: usize,
    pub error: usize,
    pub status: usize,
    pub total: usize,
}

/// Typed publish/subscribe bus with progress, error and status channels.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
///
/// ## Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use pulsebus::EventBus;
///
/// let bus = EventBus::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// bus.on_progress(move |ev| {
///     if let Some(p) = ev.progress() {
///         sink.lock().unwrap().push(p.percentage);
///     }
/// });
///
/// assert!(bus.emit_download_progress("P-1", 3, 10, None));
/// assert!(!bus.emit_network_error("reset", Some("P-1"), None));
/// assert_eq!(*seen.lock().unwrap(), vec![30]);
/// ```
pub struct EventBus {
    config: BusConfig,
    progress: Registry<ProgressEvent>,
    error: Registry<ErrorEvent>,
    status: Registry<StatusEvent>,
}

impl EventBus {
    /// Creates a bus with [`BusConfig::default`].
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates a bus with the given configuration.
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            config,
            progress: Registry::new(Channel::Progress),
            error: Registry::new(Channel::Error),
            status: Registry::new(Channel::Status),
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    // ---- Emission ----

    /// Classifies `event` and delivers it to the matching channel.
    ///
    /// Returns `true` if at least one listener was invoked.
    ///
    /// An [`Event::Unrecognized`] is classified again by its tag, so a raw
    /// payload with a known tag is still delivered. Only a genuinely unknown
    /// tag, a missing tag or a malformed body is dropped with one warning and
    /// yields `false`.
    pub fn emit(&self, event: impl Into<Event>) -> bool {
        match event.into() {
            Event::Progress(e) => self.emit_progress(e),
            Event::Error(e) => self.emit_error(e),
            Event::Status(e) => self.emit_status(e),
            Event::Unrecognized(raw) => self.emit_raw(raw),
        }
    }

    /// Parses a JSON payload and emits it.
    ///
    /// Payloads that fail to parse are treated like unrecognized tags: one
    /// warning, no delivery, `false`.
    pub fn emit_value(&self, value: Value) -> bool {
        match Event::from_value(value) {
            Ok(event) => self.emit(event),
            Err(err) => self.drop_malformed(&err),
        }
    }

    /// Delivers a progress event to the progress channel.
    pub fn emit_progress(&self, event: ProgressEvent) -> bool {
        self.progress.dispatch(&event, event.tag())
    }

    /// Delivers an error event to the error channel.
    pub fn emit_error(&self, event: ErrorEvent) -> bool {
        self.error.dispatch(&event, event.tag())
    }

    /// Delivers a status event to the status channel.
    pub fn emit_status(&self, event: StatusEvent) -> bool {
        self.status.dispatch(&event, event.tag())
    }

    fn emit_raw(&self, raw: RawEvent) -> bool {
        if Channel::classify(raw.tag()).is_none() && !raw.tag().is_empty() {
            return self.reject(&raw);
        }
        // `from_value` never yields `Unrecognized` for a known tag.
        match Event::from_value(raw.into_value()) {
            Ok(Event::Unrecognized(raw)) => self.reject(&raw),
            Ok(event) => self.emit(event),
            Err(err) => self.drop_malformed(&err),
        }
    }

    fn reject(&self, raw: &RawEvent) -> bool {
        if self.config.warn_unrecognized {
            let tag = raw.tag();
            warn!(tag, "unknown event type: {tag}");
        }
        false
    }

    fn drop_malformed(&self, err: &BusError) -> bool {
        if self.config.warn_unrecognized {
            warn!(error = %err, label = err.as_label(), "dropping event: {err}");
        }
        false
    }

    // ---- Convenience emitters ----

    /// Emits `project-start`.
    pub fn emit_project_start(
        &self,
        project_number: impl Into<String>,
        data: Option<Value>,
    ) -> bool {
        self.emit_progress(ProgressEvent::project_start(project_number).with_data(data))
    }

    /// Emits `download-progress`, deriving `percentage` from `current`/`total`.
    pub fn emit_download_progress(
        &self,
        project_number: impl Into<String>,
        current: u64,
        total: u64,
        data: Option<Value>,
    ) -> bool {
        self.emit_progress(
            ProgressEvent::download_progress(project_number, current, total).with_data(data),
        )
    }

    /// Emits `project-complete`.
    pub fn emit_project_complete(
        &self,
        project_number: impl Into<String>,
        data: Option<Value>,
    ) -> bool {
        self.emit_progress(ProgressEvent::project_complete(project_number).with_data(data))
    }

    /// Emits `validation-error`.
    pub fn emit_validation_error(
        &self,
        message: impl Into<String>,
        project_number: Option<&str>,
        cause: Option<ErrorCause>,
    ) -> bool {
        self.emit_error_kind(ErrorKind::Validation, message, project_number, cause)
    }

    /// Emits `network-error`.
    pub fn emit_network_error(
        &self,
        message: impl Into<String>,
        project_number: Option<&str>,
        cause: Option<ErrorCause>,
    ) -> bool {
        self.emit_error_kind(ErrorKind::Network, message, project_number, cause)
    }

    /// Emits `auth-error`.
    pub fn emit_auth_error(
        &self,
        message: impl Into<String>,
        project_number: Option<&str>,
        cause: Option<ErrorCause>,
    ) -> bool {
        self.emit_error_kind(ErrorKind::Auth, message, project_number, cause)
    }

    /// Emits `file-error`.
    pub fn emit_file_error(
        &self,
        message: impl Into<String>,
        project_number: Option<&str>,
        cause: Option<ErrorCause>,
    ) -> bool {
        self.emit_error_kind(ErrorKind::File, message, project_number, cause)
    }

    fn emit_error_kind(
        &self,
        kind: ErrorKind,
        message: impl Into<String>,
        project_number: Option<&str>,
        cause: Option<ErrorCause>,
    ) -> bool {
        let mut event = ErrorEvent::new(kind, message).with_cause_arc(cause);
        event.project_number = project_number.map(str::to_string);
        self.emit_error(event)
    }

    /// Emits `session-status`.
    pub fn emit_session_status(&self, status: Status, data: Option<Value>) -> bool {
        self.emit_status(StatusEvent::new(StatusKind::Session, status).with_data(data))
    }

    /// Emits `engine-status`.
    pub fn emit_engine_status(&self, status: Status, data: Option<Value>) -> bool {
        self.emit_status(StatusEvent::new(StatusKind::Engine, status).with_data(data))
    }

    // ---- Registration ----

    /// Registers a progress listener. Returns `self` for chaining.
    pub fn on_progress<F>(&self, listener: F) -> &Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.subscribe_progress(listener);
        self
    }

    /// Registers an error listener. Returns `self` for chaining.
    pub fn on_error<F>(&self, listener: F) -> &Self
    where
        F: Fn(&ErrorEvent) + Send + Sync + 'static,
    {
        self.subscribe_error(listener);
        self
    }

    /// Registers a status listener. Returns `self` for chaining.
    pub fn on_status<F>(&self, listener: F) -> &Self
    where
        F: Fn(&StatusEvent) + Send + Sync + 'static,
    {
        self.subscribe_status(listener);
        self
    }

    /// Registers a progress listener and returns its handle.
    pub fn subscribe_progress<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.progress.push(Arc::new(listener), self.config.listener_limit())
    }

    /// Registers an error listener and returns its handle.
    pub fn subscribe_error<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ErrorEvent) + Send + Sync + 'static,
    {
        self.error.push(Arc::new(listener), self.config.listener_limit())
    }

    /// Registers a status listener and returns its handle.
    pub fn subscribe_status<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StatusEvent) + Send + Sync + 'static,
    {
        self.status.push(Arc::new(listener), self.config.listener_limit())
    }

    /// Registers an already shared progress listener.
    ///
    /// Registering the same `Arc` twice runs it twice per event.
    pub fn subscribe_progress_arc(&self, listener: Listener<ProgressEvent>) -> ListenerId {
        self.progress.push(listener, self.config.listener_limit())
    }

    /// Registers an already shared error listener.
    pub fn subscribe_error_arc(&self, listener: Listener<ErrorEvent>) -> ListenerId {
        self.error.push(listener, self.config.listener_limit())
    }

    /// Registers an already shared status listener.
    pub fn subscribe_status_arc(&self, listener: Listener<StatusEvent>) -> ListenerId {
        self.status.push(listener, self.config.listener_limit())
    }

    /// Removes one registration. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        match id.channel() {
            Channel::Progress => self.progress.remove(id.seq()),
            Channel::Error => self.error.remove(id.seq()),
            Channel::Status => self.status.remove(id.seq()),
        }
    }

    /// Clears the listeners of all three channels.
    pub fn remove_all_listeners(&self) -> &Self {
        let removed = self.progress.clear() + self.error.clear() + self.status.clear();
        debug!(removed, "all listeners removed");
        self
    }

    // ---- Introspection ----

    /// Number of listeners on one channel.
    pub fn listener_count(&self, channel: Channel) -> usize {
        match channel {
            Channel::Progress => self.progress.len(),
            Channel::Error => self.error.len(),
            Channel::Status => self.status.len(),
        }
    }

    /// Current registration sizes.
    pub fn listener_counts(&self) -> ListenerCounts {
        let progress = self.progress.len();
        let error = self.error.len();
        let status = self.status.len();
        ListenerCounts {
            progress,
            error,
            status,
            total: progress + error + status,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.config)
            .field("listeners", &self.listener_counts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Progress;
    use crate::testing::{capture_logs, warnings};
    use serde_json::json;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[test]
    fn test_emit_routes_like_channel_emitter() {
        let bus = EventBus::new();
        let hits = counter();
        let h = Arc::clone(&hits);
        bus.on_progress(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        let ev = ProgressEvent::project_start("P-1");
        assert!(bus.emit(ev.clone()));
        assert!(bus.emit_progress(ev));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_only_reaches_matching_channel() {
        let bus = EventBus::new();
        let progress = counter();
        let errors = counter();
        let (p, e) = (Arc::clone(&progress), Arc::clone(&errors));
        bus.on_progress(move |_| {
            p.fetch_add(1, Ordering::SeqCst);
        })
        .on_error(move |_| {
            e.fetch_add(1, Ordering::SeqCst);
        });

        assert!(bus.emit(ErrorEvent::validation("bad project number")));
        assert!(!bus.emit(StatusEvent::engine(Status::Running)));
        assert_eq!(progress.load(Ordering::SeqCst), 0);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_status_listeners_run_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["L1", "L2", "L3"] {
            let order = Arc::clone(&order);
            bus.on_status(move |_| order.lock().unwrap().push(name));
        }

        assert!(bus.emit_session_status(Status::Running, None));
        assert_eq!(*order.lock().unwrap(), vec!["L1", "L2", "L3"]);
    }

    #[test]
    fn test_duplicate_registration_runs_per_registration() {
        let bus = EventBus::new();
        let hits = counter();
        let h = Arc::clone(&hits);
        let listener: Listener<ProgressEvent> = Arc::new(move |_: &ProgressEvent| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        let first = bus.subscribe_progress_arc(Arc::clone(&listener));
        let second = bus.subscribe_progress_arc(listener);
        assert_ne!(first, second);
        assert_eq!(bus.listener_counts().progress, 2);

        assert!(bus.emit_project_start("P-1", None));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(bus.unsubscribe(first));
        assert!(bus.emit_project_complete("P-1", None));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_download_progress_payload() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        bus.on_progress(move |ev| s.lock().unwrap().push(ev.clone()));

        bus.emit_download_progress("P-7", 3, 10, None);
        bus.emit_download_progress("P-7", 1, 3, None);
        bus.emit_download_progress("P-7", 2, 3, Some(json!({"file": "a.pdf"})));

        let seen = seen.lock().unwrap();
        let pcts: Vec<_> = seen.iter().filter_map(|e| e.progress().copied()).collect();
        assert_eq!(
            pcts,
            vec![Progress::new(3, 10), Progress::new(1, 3), Progress::new(2, 3)]
        );
        assert_eq!(
            pcts.iter().map(|p| p.percentage).collect::<Vec<_>>(),
            vec![30, 33, 67]
        );
        assert_eq!(
            serde_json::to_value(&seen[0]).unwrap()["progress"],
            json!({"current": 3, "total": 10, "percentage": 30})
        );
        assert_eq!(seen[2].data(), Some(&json!({"file": "a.pdf"})));
    }

    #[test]
    fn test_convenience_error_shape() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(None));
        let s = Arc::clone(&seen);
        bus.on_error(move |ev| *s.lock().unwrap() = Some(ev.clone()));

        let cause: ErrorCause = Arc::new(std::io::Error::other("socket closed"));
        assert!(bus.emit_network_error("download failed", Some("P-2"), Some(cause)));

        let ev = seen.lock().unwrap().clone().unwrap();
        assert_eq!(ev.kind, ErrorKind::Network);
        assert_eq!(ev.message, "download failed");
        assert_eq!(ev.project_number.as_deref(), Some("P-2"));
        assert_eq!(ev.error.unwrap().to_string(), "socket closed");
    }

    #[test]
    fn test_unrecognized_tag_warns_once_and_returns_false() {
        let bus = EventBus::new();
        let hits = counter();
        let h = Arc::clone(&hits);
        bus.on_progress(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        let (delivered, lines) = capture_logs(|| bus.emit(Event::unrecognized("bogus-event")));

        assert!(!delivered);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        let warns = warnings(&lines);
        assert_eq!(warns.len(), 1);
        assert!(warns[0].message.contains("bogus-event"));
    }

    #[test]
    fn test_raw_event_with_known_tag_is_delivered() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        bus.on_progress(move |ev| s.lock().unwrap().push(ev.clone()));

        let raw = RawEvent::new(json!({"type": "project-start", "projectNumber": "P-1"}));
        let (delivered, lines) = capture_logs(|| bus.emit(raw));
        assert!(delivered);
        assert!(warnings(&lines).is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![ProgressEvent::project_start("P-1")]);

        // Known tag but no body: a decode failure, not an unknown tag.
        let (delivered, lines) =
            capture_logs(|| bus.emit(Event::unrecognized("download-progress")));
        assert!(!delivered);
        let warns = warnings(&lines);
        assert_eq!(warns.len(), 1);
        assert!(warns[0].message.contains("malformed event payload"));
        assert!(!warns[0].message.contains("unknown event type"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_raw_event_without_tag_reports_missing_tag() {
        let bus = EventBus::new();
        bus.on_status(|_| panic!("must not be delivered"));

        let (delivered, lines) = capture_logs(|| bus.emit(RawEvent::new(json!({"foo": 1}))));
        assert!(!delivered);
        let warns = warnings(&lines);
        assert_eq!(warns.len(), 1);
        assert!(warns[0].message.contains("no string `type` field"));
        assert!(!warns[0].message.contains("unknown event type"));
    }

    #[test]
    fn test_unrecognized_warning_can_be_disabled() {
        let bus = EventBus::with_config(BusConfig::default().with_warn_unrecognized(false));
        let (delivered, lines) = capture_logs(|| bus.emit(Event::unrecognized("bogus-event")));
        assert!(!delivered);
        assert!(warnings(&lines).is_empty());
    }

    #[test]
    fn test_emit_value() {
        let bus = EventBus::new();
        let hits = counter();
        let h = Arc::clone(&hits);
        bus.on_status(move |ev| {
            assert_eq!(ev.status, Status::Stopped);
            h.fetch_add(1, Ordering::SeqCst);
        });

        assert!(bus.emit_value(json!({"type": "engine-status", "status": "stopped"})));
        let (delivered, lines) = capture_logs(|| bus.emit_value(json!({"status": "idle"})));
        assert!(!delivered);
        assert_eq!(warnings(&lines).len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_listeners_is_not_an_error() {
        let bus = EventBus::new();
        assert!(!bus.emit_project_complete("P-1", None));
        assert!(!bus.emit_auth_error("expired", None, None));
        assert!(!bus.emit_engine_status(Status::Idle, None));
    }

    #[test]
    fn test_remove_all_listeners() {
        let bus = EventBus::new();
        bus.on_progress(|_| {})
            .on_progress(|_| {})
            .on_error(|_| {})
            .on_status(|_| {});
        assert_eq!(
            bus.listener_counts(),
            ListenerCounts {
                progress: 2,
                error: 1,
                status: 1,
                total: 4
            }
        );

        bus.remove_all_listeners();
        assert_eq!(bus.listener_counts(), ListenerCounts::default());
        assert!(!bus.emit(ProgressEvent::project_start("P-1")));
        assert!(!bus.emit(ErrorEvent::file("disk full")));
        assert!(!bus.emit(StatusEvent::session(Status::Idle)));

        bus.remove_all_listeners().remove_all_listeners();
        assert_eq!(bus.listener_counts(), ListenerCounts::default());
    }

    #[test]
    fn test_counts_total_invariant() {
        let bus = EventBus::new();
        let mut ids = Vec::new();
        for i in 0..9 {
            let id = match i % 3 {
                0 => bus.subscribe_progress(|_| {}),
                1 => bus.subscribe_error(|_| {}),
                _ => bus.subscribe_status(|_| {}),
            };
            ids.push(id);
            let c = bus.listener_counts();
            assert_eq!(c.total, c.progress + c.error + c.status);
        }
        assert!(bus.unsubscribe(ids[4]));
        assert!(!bus.unsubscribe(ids[4]));
        let c = bus.listener_counts();
        assert_eq!((c.progress, c.error, c.status, c.total), (3, 2, 3, 8));
        assert_eq!(bus.listener_count(Channel::Error), 2);
    }

    #[test]
    fn test_registration_during_dispatch_uses_snapshot() {
        let bus = Arc::new(EventBus::new());
        let late = counter();

        let inner_bus = Arc::clone(&bus);
        let l = Arc::clone(&late);
        bus.on_status(move |_| {
            let l = Arc::clone(&l);
            inner_bus.on_status(move |_| {
                l.fetch_add(1, Ordering::SeqCst);
            });
        });

        assert!(bus.emit_session_status(Status::Starting, None));
        assert_eq!(late.load(Ordering::SeqCst), 0);
        assert_eq!(bus.listener_count(Channel::Status), 2);

        bus.emit_session_status(Status::Running, None);
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_during_dispatch_keeps_snapshot() {
        let bus = Arc::new(EventBus::new());
        let second = counter();

        let inner_bus = Arc::clone(&bus);
        bus.on_error(move |_| {
            inner_bus.remove_all_listeners();
        });
        let s = Arc::clone(&second);
        bus.on_error(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        assert!(bus.emit(ErrorEvent::auth("expired")));
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_counts().total, 0);
    }

    #[test]
    fn test_listener_panic_propagates_and_stops_dispatch() {
        let bus = EventBus::new();
        let after = counter();
        bus.on_progress(|_| panic!("listener broke"));
        let a = Arc::clone(&after);
        bus.on_progress(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
        });

        let result = catch_unwind(AssertUnwindSafe(|| bus.emit_project_start("P-1", None)));
        assert!(result.is_err());
        assert_eq!(after.load(Ordering::SeqCst), 0);

        // Registry stays usable after the unwind.
        assert_eq!(bus.listener_count(Channel::Progress), 2);
        bus.remove_all_listeners();
        assert_eq!(bus.listener_counts().total, 0);
    }

    #[test]
    fn test_leak_warning_once_per_channel() {
        let bus = EventBus::with_config(BusConfig::default().with_max_listeners(2));
        let (_, lines) = capture_logs(|| {
            for _ in 0..5 {
                bus.on_progress(|_| {});
            }
            bus.on_error(|_| {});
        });
        let warns = warnings(&lines);
        assert_eq!(warns.len(), 1);
        assert!(warns[0].message.contains("progress"));
        assert_eq!(bus.listener_count(Channel::Progress), 5);

        bus.remove_all_listeners();
        let (_, lines) = capture_logs(|| {
            for _ in 0..3 {
                bus.on_progress(|_| {});
            }
        });
        assert_eq!(warnings(&lines).len(), 1);
    }

    #[test]
    fn test_unlimited_never_warns() {
        let bus = EventBus::with_config(BusConfig::default().with_max_listeners(0));
        let (_, lines) = capture_logs(|| {
            for _ in 0..50 {
                bus.on_status(|_| {});
            }
        });
        assert!(warnings(&lines).is_empty());
    }

    #[test]
    fn test_concurrent_registration_and_emit() {
        let bus = Arc::new(EventBus::with_config(
            BusConfig::default().with_max_listeners(0),
        ));
        let hits = counter();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let bus = Arc::clone(&bus);
                let hits = Arc::clone(&hits);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        let h = Arc::clone(&hits);
                        bus.on_progress(move |_| {
                            h.fetch_add(1, Ordering::Relaxed);
                        });
                        bus.emit_project_start("P-1", None);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let c = bus.listener_counts();
        assert_eq!(c.progress, 100);
        assert_eq!(c.total, 100);
        assert!(hits.load(Ordering::Relaxed) >= 100);
    }
}

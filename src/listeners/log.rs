//! # LogWriter: event printer over `tracing`
//!
//! A listener that renders every event on all three channels as one log line.
//! Progress and status go out at `info`, errors at `warn`.
//!
//! ## Example output
//! ```text
//! [project-start] project=P-1
//! [download-progress] project=P-1 3/10 (30%)
//! [network-error] project=P-1 msg="connection reset" cause="os error 104"
//! [project-complete] project=P-1
//! [engine-status] status=stopped
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::bus::{EventBus, ListenerId};
use crate::events::{ErrorEvent, ProgressEvent, StatusEvent};

/// Event writer listener.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registers the writer on every channel.
    pub fn attach(self: &Arc<Self>, bus: &EventBus) -> [ListenerId; 3] {
        let p = Arc::clone(self);
        let e = Arc::clone(self);
        let s = Arc::clone(self);
        [
            bus.subscribe_progress(move |ev| p.on_progress(ev)),
            bus.subscribe_error(move |ev| e.on_error(ev)),
            bus.subscribe_status(move |ev| s.on_status(ev)),
        ]
    }

    pub fn on_progress(&self, ev: &ProgressEvent) {
        info!("{}", render_progress(ev));
    }

    pub fn on_error(&self, ev: &ErrorEvent) {
        warn!("{}", render_error(ev));
    }

    pub fn on_status(&self, ev: &StatusEvent) {
        info!("{}", render_status(ev));
    }
}

fn render_progress(ev: &ProgressEvent) -> String {
    match ev.progress() {
        Some(p) => format!(
            "[{}] project={} {}/{} ({}%)",
            ev.tag(),
            ev.project_number(),
            p.current,
            p.total,
            p.percentage
        ),
        None => format!("[{}] project={}", ev.tag(), ev.project_number()),
    }
}

fn render_error(ev: &ErrorEvent) -> String {
    let mut line = format!("[{}]", ev.tag());
    if let Some(project) = &ev.project_number {
        line.push_str(&format!(" project={project}"));
    }
    line.push_str(&format!(" msg={:?}", ev.message));
    if let Some(cause) = &ev.error {
        line.push_str(&format!(" cause={:?}", cause.to_string()));
    }
    line
}

fn render_status(ev: &StatusEvent) -> String {
    format!("[{}] status={}", ev.tag(), ev.status)
}

//! Test helpers shared by unit tests.
//!
//! [`capture_logs`] runs a closure under a thread-local `tracing` subscriber
//! that records every event's level and message.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One captured log line.
#[derive(Debug, Clone)]
pub(crate) struct LogLine {
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<LogLine>>>);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(LogLine {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

/// Runs `f` and returns its output together with every log line it produced.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<LogLine>) {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let lines = capture.0.lock().unwrap().clone();
    (out, lines)
}

/// Only the `WARN` lines.
pub(crate) fn warnings(lines: &[LogLine]) -> Vec<&LogLine> {
    lines.iter().filter(|l| l.level == Level::WARN).collect()
}

//! # Example: download_progress
//!
//! Simulates a download engine reporting to a bus with three kinds of consumers:
//! - inline closures on the progress and error channels,
//! - built-in [`StatusTracker`] and [`LogWriter`] listeners,
//! - an async [`Subscribe`] implementation fed through a [`SubscriberSet`].
//!
//! ## Flow
//! ```text
//! engine ──► EventBus::emit_*()
//!              ├─► progress listeners ──► closure, LogWriter, SubscriberSet
//!              ├─► error listeners    ──► closure, LogWriter, SubscriberSet
//!              └─► status listeners   ──► StatusTracker, LogWriter, SubscriberSet
//!                                                           │
//!                                                           └─► Console::on_event()
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example download_progress
//! ```

use std::sync::Arc;
use std::time::Duration;

use pulsebus::{
    ErrorCause, Event, EventBus, LogWriter, Status, StatusTracker, Subscribe, SubscriberSet,
};

/// Async consumer standing in for a UI bridge.
struct Console;

#[async_trait::async_trait]
impl Subscribe for Console {
    async fn on_event(&self, ev: &Event) {
        tokio::time::sleep(Duration::from_millis(5)).await;
        match ev {
            Event::Progress(p) => match p.progress() {
                Some(pr) => println!("[ui] {} {:>3}%", p.project_number(), pr.percentage),
                None => println!("[ui] {} {}", p.project_number(), p.tag()),
            },
            Event::Error(e) => println!("[ui] error: {}", e.message),
            Event::Status(s) => println!("[ui] {} -> {}", s.tag(), s.status),
            Event::Unrecognized(_) => {}
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulsebus=info,info".into()),
        )
        .init();

    let bus = Arc::new(EventBus::new());

    let tracker = Arc::new(StatusTracker::new());
    tracker.attach(&bus);
    Arc::new(LogWriter::new()).attach(&bus);

    let subs = SubscriberSet::new(vec![Arc::new(Console) as Arc<dyn Subscribe>]);
    subs.attach(&bus);

    bus.on_error(|ev| {
        if let Some(cause) = &ev.error {
            eprintln!("cause: {cause}");
        }
    });

    bus.emit_engine_status(Status::Running, None);
    for project in ["P-100", "P-101"] {
        bus.emit_project_start(project, None);
        let total = 4;
        for current in 1..=total {
            bus.emit_download_progress(project, current, total, None);
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        bus.emit_project_complete(project, None);
    }

    let cause: ErrorCause = Arc::new(std::io::Error::other("connection reset by peer"));
    bus.emit_network_error("download interrupted", Some("P-102"), Some(cause));

    // Unknown tags are logged and dropped.
    let delivered = bus.emit_value(serde_json::json!({"type": "bogus-event"}));
    println!("bogus-event delivered: {delivered}");

    bus.emit_engine_status(Status::Stopped, None);
    println!("listeners: {:?}", bus.listener_counts());
    println!("engine status: {:?}", tracker.engine());

    subs.shutdown().await;
    bus.remove_all_listeners();
    Ok(())
}

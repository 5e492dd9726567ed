//! # Non-blocking fan-out from the bus to async subscribers.
//!
//! Provides [`SubscriberSet`]: once attached to an [`EventBus`], every event on
//! every channel is queued to each subscriber without awaiting its processing.
//!
//! ## Architecture
//! ```text
//! EventBus::emit(event)
//!     │  (sync listener, one per channel)
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → error! log
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_event()
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - **Non-blocking**: the bus listener uses `try_send` and returns immediately
//! - **Overflow**: event dropped for that subscriber only, `warn!` logged
//! - **Isolation**: a slow or panicking subscriber doesn't affect others
//! - **Per-subscriber FIFO**: each subscriber sees events in emit order
//! - **No cross-subscriber ordering**
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a subscriber panics while holding a lock.

use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{error, warn};

use crate::bus::{EventBus, ListenerId};
use crate::events::Event;
use crate::subscribers::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

type Channels = Arc<RwLock<Vec<SubscriberChannel>>>;

/// Fan-out coordinator for async subscribers.
pub struct SubscriberSet {
    channels: Channels,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());

                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await
                    {
                        let info = {
                            let any = &*panic_err;
                            if let Some(msg) = any.downcast_ref::<&'static str>() {
                                (*msg).to_string()
                            } else if let Some(msg) = any.downcast_ref::<String>() {
                                msg.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        error!(
                            subscriber = sub.name(),
                            tag = ev.tag(),
                            "subscriber panicked: {info}"
                        );
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self {
            channels: Arc::new(RwLock::new(channels)),
            workers,
        }
    }

    /// Registers one listener per bus channel that forwards into this set.
    ///
    /// The returned ids can be passed to [`EventBus::unsubscribe`]. The
    /// listeners share this set's queues: once the set is shut down or
    /// dropped, the queues are closed and the listeners become no-ops.
    pub fn attach(&self, bus: &EventBus) -> [ListenerId; 3] {
        let progress = Arc::clone(&self.channels);
        let error = Arc::clone(&self.channels);
        let status = Arc::clone(&self.channels);
        [
            bus.subscribe_progress(move |ev| fan_out(&progress, Arc::new(ev.clone().into()))),
            bus.subscribe_error(move |ev| fan_out(&error, Arc::new(ev.clone().into()))),
            bus.subscribe_status(move |ev| fan_out(&status, Arc::new(ev.clone().into()))),
        ]
    }

    /// Queues an event to all subscribers (clones the event).
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Queues a pre-allocated `Arc<Event>` to all subscribers.
    pub fn emit_arc(&self, event: Arc<Event>) {
        fan_out(&self.channels, event);
    }

    /// Number of live subscriber queues.
    pub fn len(&self) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// 1. Drops all queue senders (attached bus listeners become no-ops)
    /// 2. Awaits the workers, which drain what is already queued
    pub async fn shutdown(mut self) {
        self.close();

        for h in std::mem::take(&mut self.workers) {
            let _ = h.await;
        }
    }

    fn close(&self) {
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Closes the queues without awaiting; workers drain and exit on their own.
impl Drop for SubscriberSet {
    fn drop(&mut self) {
        self.close();
    }
}

fn fan_out(channels: &Channels, event: Arc<Event>) {
    let channels = channels.read().unwrap_or_else(PoisonError::into_inner);
    for channel in channels.iter() {
        match channel.sender.try_send(Arc::clone(&event)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(
                    subscriber = channel.name,
                    reason = "full",
                    tag = event.tag(),
                    "subscriber queue overflow"
                );
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(
                    subscriber = channel.name,
                    reason = "closed",
                    tag = event.tag(),
                    "subscriber queue closed"
                );
            }
        }
    }
}

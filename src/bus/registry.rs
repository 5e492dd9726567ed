//! # Per-channel listener registry.
//!
//! [`Registry`] holds the ordered listener list for one channel. The bus owns
//! three of them and never shares them.
//!
//! ## Rules
//! - **Append-only registration**: no de-duplication, no priority; the same
//!   closure registered twice runs twice.
//! - **Snapshot dispatch**: [`Registry::dispatch`] clones the list under a read
//!   lock, releases the lock, then runs listeners. Registrations made during a
//!   dispatch apply to the next one, and the lock is never held across user code.
//! - **Leak warning**: exceeding the configured limit logs once per channel;
//!   [`Registry::clear`] re-arms it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace, warn};

use crate::events::{Channel, EventTag};

/// Shared listener callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync + 'static>;

/// Global registration counter; ids are unique across channels and buses.
static LISTENER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Handle to a single registration, used with
/// [`EventBus::unsubscribe`](crate::EventBus::unsubscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    channel: Channel,
    seq: u64,
}

impl ListenerId {
    /// Channel the listener was registered on.
    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[inline]
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}

pub(crate) struct Registry<E> {
    channel: Channel,
    entries: RwLock<Vec<(u64, Listener<E>)>>,
    leak_warned: AtomicBool,
}

impl<E> Registry<E> {
    pub(crate) fn new(channel: Channel) -> Self {
        Self {
            channel,
            entries: RwLock::new(Vec::new()),
            leak_warned: AtomicBool::new(false),
        }
    }

    /// Appends a listener; warns once when `limit` is exceeded.
    pub(crate) fn push(&self, listener: Listener<E>, limit: Option<usize>) -> ListenerId {
        let seq = LISTENER_SEQ.fetch_add(1, Ordering::Relaxed);
        let len = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.push((seq, listener));
            entries.len()
        };

        if let Some(limit) = limit {
            if len > limit && !self.leak_warned.swap(true, Ordering::Relaxed) {
                warn!(
                    channel = %self.channel,
                    listeners = len,
                    limit,
                    "possible listener leak: {len} listeners on channel '{}' (limit {limit})",
                    self.channel
                );
            }
        }

        ListenerId {
            channel: self.channel,
            seq,
        }
    }

    /// Removes the registration with the given sequence number.
    pub(crate) fn remove(&self, seq: u64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter().position(|(s, _)| *s == seq) {
            Some(idx) => {
                entries.remove(idx);
                debug!(channel = %self.channel, remaining = entries.len(), "listener removed");
                true
            }
            None => false,
        }
    }

    /// Drops every registration and returns how many were removed.
    pub(crate) fn clear(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            let n = entries.len();
            entries.clear();
            n
        };
        self.leak_warned.store(false, Ordering::Relaxed);
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn snapshot(&self) -> Vec<Listener<E>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect()
    }

    /// Invokes every listener registered at call time, in order.
    ///
    /// Returns `false` when the channel had no listeners. A panicking listener
    /// unwinds through this call and the remaining listeners are skipped.
    pub(crate) fn dispatch(&self, event: &E, tag: EventTag) -> bool {
        let listeners = self.snapshot();
        if listeners.is_empty() {
            trace!(channel = %self.channel, %tag, "no listeners");
            return false;
        }

        trace!(channel = %self.channel, %tag, listeners = listeners.len(), "dispatch");
        for listener in &listeners {
            listener(event);
        }
        true
    }
}

//! # Session/engine status tracker.
//!
//! Remembers the last [`Status`] reported for the session and for the engine,
//! so late-joining consumers can read current state instead of waiting for
//! the next transition.
//!
//! ## Rules
//! - Only the status channel updates the tracker
//! - Repeating the current status is not counted as a transition

use std::sync::{Arc, PoisonError, RwLock};

use crate::bus::{EventBus, ListenerId};
use crate::events::{Status, StatusEvent, StatusKind};

/// Point-in-time view of a [`StatusTracker`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub session: Option<Status>,
    pub engine: Option<Status>,
    /// Number of status changes observed.
    pub transitions: u64,
}

/// Thread-safe tracker of the latest session and engine status.
#[derive(Debug, Default)]
pub struct StatusTracker {
    state: RwLock<StatusSnapshot>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the tracker on the status channel.
    pub fn attach(self: &Arc<Self>, bus: &EventBus) -> ListenerId {
        let tracker = Arc::clone(self);
        bus.subscribe_status(move |ev| {
            tracker.update(ev);
        })
    }

    /// Applies a status event; returns `true` if the status changed.
    pub fn update(&self, ev: &StatusEvent) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let slot = match ev.kind {
            StatusKind::Session => &mut state.session,
            StatusKind::Engine => &mut state.engine,
        };
        if *slot == Some(ev.status) {
            return false;
        }
        *slot = Some(ev.status);
        state.transitions += 1;
        true
    }

    pub fn session(&self) -> Option<Status> {
        self.snapshot().session
    }

    pub fn engine(&self) -> Option<Status> {
        self.snapshot().engine
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

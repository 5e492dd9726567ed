//! # Per-project progress tracker.
//!
//! Keeps the latest known state of every project seen on the progress and
//! error channels, keyed by project number.
//!
//! ## Architecture
//! ```text
//! DownloadEngine ──► EventBus ──► progress listener ──► ProjectTracker::record_progress()
//!                             └─► error listener    ──► ProjectTracker::record_error()
//!                                                              │
//!                                                              ▼
//!                                               HashMap<String, ProjectState>
//! ```
//!
//! ## Rules
//! - `project-start` marks a project active and resets its counters
//! - `download-progress` updates the latest [`Progress`]
//! - `project-complete` marks it finished
//! - error events with a project number bump that project's error count;
//!   error events without one are ignored

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::bus::{EventBus, ListenerId};
use crate::events::{ErrorEvent, Progress, ProgressEvent};

/// Latest state of a single project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    /// Started and not yet completed.
    pub active: bool,
    /// Completed at least once.
    pub complete: bool,
    /// Last reported counters.
    pub progress: Option<Progress>,
    /// Error events attributed to the project.
    pub errors: u32,
}

/// Thread-safe tracker of project progress.
#[derive(Debug, Default)]
pub struct ProjectTracker {
    state: RwLock<HashMap<String, ProjectState>>,
}

impl ProjectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the tracker on the progress and error channels.
    pub fn attach(self: &Arc<Self>, bus: &EventBus) -> [ListenerId; 2] {
        let on_progress = Arc::clone(self);
        let on_error = Arc::clone(self);
        [
            bus.subscribe_progress(move |ev| on_progress.record_progress(ev)),
            bus.subscribe_error(move |ev| {
                on_error.record_error(ev);
            }),
        ]
    }

    /// Applies a progress event.
    pub fn record_progress(&self, ev: &ProgressEvent) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let entry = state.entry(ev.project_number().to_string()).or_default();
        match ev {
            ProgressEvent::ProjectStart { .. } => {
                *entry = ProjectState {
                    active: true,
                    ..ProjectState::default()
                };
            }
            ProgressEvent::DownloadProgress { progress, .. } => {
                entry.progress = Some(*progress);
            }
            ProgressEvent::ProjectComplete { .. } => {
                entry.active = false;
                entry.complete = true;
            }
        }
    }

    /// Applies an error event; returns `false` if it names no project.
    pub fn record_error(&self, ev: &ErrorEvent) -> bool {
        let Some(project) = ev.project_number.as_deref() else {
            return false;
        };
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let entry = state.entry(project.to_string()).or_default();
        entry.errors = entry.errors.saturating_add(1);
        true
    }

    /// State of one project, if seen.
    pub fn get(&self, project_number: &str) -> Option<ProjectState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(project_number)
            .cloned()
    }

    /// Sorted project numbers that are started but not complete.
    pub fn active(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut active: Vec<String> = state
            .iter()
            .filter(|(_, s)| s.active)
            .map(|(name, _)| name.clone())
            .collect();
        active.sort_unstable();
        active
    }
}

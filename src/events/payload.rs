//! # Per-channel event payloads.
//!
//! One type per channel family:
//! - [`ProgressEvent`]: project lifecycle and download counters
//! - [`ErrorEvent`]: failures reported by producers, classified by [`ErrorKind`]
//! - [`StatusEvent`]: session/engine lifecycle transitions, see [`Status`]
//!
//! The wire shape is JSON with a `type` discriminant and camelCase field names:
//!
//! ```text
//! {"type":"download-progress","projectNumber":"P-1","progress":{"current":3,"total":10,"percentage":30}}
//! {"type":"network-error","message":"connection reset","projectNumber":"P-1"}
//! {"type":"session-status","status":"running"}
//! ```
//!
//! `data` is an opaque JSON value the bus never inspects. The `error` cause on
//! [`ErrorEvent`] is kept in-process only and is not serialized.
//!
//! ## Example
//! ```rust
//! use pulsebus::{ErrorEvent, ErrorKind, ProgressEvent};
//!
//! let ev = ProgressEvent::download_progress("P-1", 3, 10);
//! assert_eq!(ev.progress().map(|p| p.percentage), Some(30));
//!
//! let err = ErrorEvent::network("connection reset").with_project("P-1");
//! assert_eq!(err.kind, ErrorKind::Network);
//! assert_eq!(err.project_number.as_deref(), Some("P-1"));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BusError;
use crate::events::tag::EventTag;

/// Opaque underlying failure attached to an [`ErrorEvent`].
pub type ErrorCause = Arc<dyn StdError + Send + Sync>;

/// Download counters carried by `download-progress`.
///
/// `percentage` is derived once, at construction, as `round(current / total * 100)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Units done.
    pub current: u64,
    /// Units expected.
    pub total: u64,
    /// Whole percent in `0..=100`.
    pub percentage: u8,
}

impl Progress {
    /// Builds counters and derives the percentage.
    ///
    /// Rounds half up. Producers are expected to pass `total > 0` and
    /// `current <= total`; otherwise the percentage is `0` for `total == 0`
    /// and clamped to `100` for overshoot. Use [`Progress::checked`] to reject
    /// such input instead.
    pub fn new(current: u64, total: u64) -> Self {
        Self {
            current,
            total,
            percentage: percent(current, total),
        }
    }

    /// Like [`Progress::new`] but rejects `total == 0` and `current > total`.
    pub fn checked(current: u64, total: u64) -> Result<Self, BusError> {
        if total == 0 || current > total {
            return Err(BusError::InvalidProgress { current, total });
        }
        Ok(Self::new(current, total))
    }

    /// Returns `true` when all units are done.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.current >= self.total
    }
}

fn percent(current: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let (current, total) = (u128::from(current), u128::from(total));
    let pct = (current * 200 + total) / (total * 2);
    pct.min(100) as u8
}

/// Progress channel events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProgressEvent {
    /// A project started processing.
    ProjectStart {
        #[serde(rename = "projectNumber")]
        project_number: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    /// Download counters advanced.
    DownloadProgress {
        #[serde(rename = "projectNumber")]
        project_number: String,
        progress: Progress,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    /// A project finished processing.
    ProjectComplete {
        #[serde(rename = "projectNumber")]
        project_number: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
}

impl ProgressEvent {
    /// `project-start` without data.
    pub fn project_start(project_number: impl Into<String>) -> Self {
        ProgressEvent::ProjectStart {
            project_number: project_number.into(),
            data: None,
        }
    }

    /// `download-progress` with the percentage derived from `current`/`total`.
    pub fn download_progress(project_number: impl Into<String>, current: u64, total: u64) -> Self {
        ProgressEvent::DownloadProgress {
            project_number: project_number.into(),
            progress: Progress::new(current, total),
            data: None,
        }
    }

    /// `project-complete` without data.
    pub fn project_complete(project_number: impl Into<String>) -> Self {
        ProgressEvent::ProjectComplete {
            project_number: project_number.into(),
            data: None,
        }
    }

    /// Attaches (or clears) the opaque data payload.
    #[must_use]
    pub fn with_data(mut self, value: Option<Value>) -> Self {
        match &mut self {
            ProgressEvent::ProjectStart { data, .. }
            | ProgressEvent::DownloadProgress { data, .. }
            | ProgressEvent::ProjectComplete { data, .. } => *data = value,
        }
        self
    }

    pub fn tag(&self) -> EventTag {
        match self {
            ProgressEvent::ProjectStart { .. } => EventTag::ProjectStart,
            ProgressEvent::DownloadProgress { .. } => EventTag::DownloadProgress,
            ProgressEvent::ProjectComplete { .. } => EventTag::ProjectComplete,
        }
    }

    pub fn project_number(&self) -> &str {
        match self {
            ProgressEvent::ProjectStart { project_number, .. }
            | ProgressEvent::DownloadProgress { project_number, .. }
            | ProgressEvent::ProjectComplete { project_number, .. } => project_number,
        }
    }

    /// Counters, only for `download-progress`.
    pub fn progress(&self) -> Option<&Progress> {
        match self {
            ProgressEvent::DownloadProgress { progress, .. } => Some(progress),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ProgressEvent::ProjectStart { data, .. }
            | ProgressEvent::DownloadProgress { data, .. }
            | ProgressEvent::ProjectComplete { data, .. } => data.as_ref(),
        }
    }
}

/// Classification of [`ErrorEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Input or project metadata failed validation.
    #[serde(rename = "validation-error")]
    Validation,
    /// Transport-level failure.
    #[serde(rename = "network-error")]
    Network,
    /// Credentials rejected or session expired.
    #[serde(rename = "auth-error")]
    Auth,
    /// Local filesystem failure.
    #[serde(rename = "file-error")]
    File,
}

impl ErrorKind {
    pub fn tag(self) -> EventTag {
        match self {
            ErrorKind::Validation => EventTag::ValidationError,
            ErrorKind::Network => EventTag::NetworkError,
            ErrorKind::Auth => EventTag::AuthError,
            ErrorKind::File => EventTag::FileError,
        }
    }
}

/// Error channel event.
///
/// - `kind`: serialized as the `type` tag
/// - `message`: human-readable, required
/// - `project_number`: project the failure belongs to, if any
/// - `error`: underlying cause; carried through untouched, never serialized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(
        rename = "projectNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub project_number: Option<String>,
    #[serde(skip)]
    pub error: Option<ErrorCause>,
}

impl ErrorEvent {
    /// Creates an error event of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            project_number: None,
            error: None,
        }
    }

    #[inline]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    #[inline]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    #[inline]
    pub fn file(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::File, message)
    }

    /// Attaches a project number.
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project_number: impl Into<String>) -> Self {
        self.project_number = Some(project_number.into());
        self
    }

    /// Attaches the underlying cause.
    #[inline]
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.error = Some(Arc::from(cause.into()));
        self
    }

    /// Attaches an already shared cause.
    #[inline]
    #[must_use]
    pub fn with_cause_arc(mut self, cause: Option<ErrorCause>) -> Self {
        self.error = cause;
        self
    }

    #[inline]
    pub fn tag(&self) -> EventTag {
        self.kind.tag()
    }
}

/// Lifecycle states reported by sessions and the download engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Starting,
    Running,
    Paused,
    Stopping,
    Stopped,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Starting => "starting",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Stopping => "stopping",
            Status::Stopped => "stopped",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which collaborator a [`StatusEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    #[serde(rename = "session-status")]
    Session,
    #[serde(rename = "engine-status")]
    Engine,
}

impl StatusKind {
    pub fn tag(self) -> EventTag {
        match self {
            StatusKind::Session => EventTag::SessionStatus,
            StatusKind::Engine => EventTag::EngineStatus,
        }
    }
}

/// Status channel event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    #[serde(rename = "type")]
    pub kind: StatusKind,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl StatusEvent {
    pub fn new(kind: StatusKind, status: Status) -> Self {
        Self {
            kind,
            status,
            data: None,
        }
    }

    #[inline]
    pub fn session(status: Status) -> Self {
        Self::new(StatusKind::Session, status)
    }

    #[inline]
    pub fn engine(status: Status) -> Self {
        Self::new(StatusKind::Engine, status)
    }

    /// Attaches (or clears) the opaque data payload.
    #[inline]
    #[must_use]
    pub fn with_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    #[inline]
    pub fn tag(&self) -> EventTag {
        self.kind.tag()
    }
}

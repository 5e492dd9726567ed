//! # Event tags and channel classification.
//!
//! Every event carries a `type` discriminant drawn from a closed set of nine
//! tags. Each tag belongs to exactly one [`Channel`]:
//!
//! ```text
//! progress: project-start, download-progress, project-complete
//! error:    validation-error, network-error, auth-error, file-error
//! status:   session-status, engine-status
//! ```
//!
//! [`Channel::classify`] is the single place a raw tag string is mapped to a
//! channel; anything it does not recognize is left to the soft-fail path in
//! [`EventBus::emit`](crate::EventBus::emit).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BusError;

/// Listener group an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Progress,
    Error,
    Status,
}

impl Channel {
    /// All channels in a stable order.
    pub const ALL: [Channel; 3] = [Channel::Progress, Channel::Error, Channel::Status];

    /// Maps a raw `type` tag to its channel; `None` for unknown tags.
    pub fn classify(tag: &str) -> Option<Channel> {
        tag.parse::<EventTag>().ok().map(EventTag::channel)
    }

    /// Lowercase channel name.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Progress => "progress",
            Channel::Error => "error",
            Channel::Status => "status",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of known event tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    ProjectStart,
    DownloadProgress,
    ProjectComplete,
    ValidationError,
    NetworkError,
    AuthError,
    FileError,
    SessionStatus,
    EngineStatus,
}

impl EventTag {
    /// Every known tag.
    pub const ALL: [EventTag; 9] = [
        EventTag::ProjectStart,
        EventTag::DownloadProgress,
        EventTag::ProjectComplete,
        EventTag::ValidationError,
        EventTag::NetworkError,
        EventTag::AuthError,
        EventTag::FileError,
        EventTag::SessionStatus,
        EventTag::EngineStatus,
    ];

    /// Wire form of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            EventTag::ProjectStart => "project-start",
            EventTag::DownloadProgress => "download-progress",
            EventTag::ProjectComplete => "project-complete",
            EventTag::ValidationError => "validation-error",
            EventTag::NetworkError => "network-error",
            EventTag::AuthError => "auth-error",
            EventTag::FileError => "file-error",
            EventTag::SessionStatus => "session-status",
            EventTag::EngineStatus => "engine-status",
        }
    }

    /// Channel family the tag belongs to.
    pub fn channel(self) -> Channel {
        match self {
            EventTag::ProjectStart | EventTag::DownloadProgress | EventTag::ProjectComplete => {
                Channel::Progress
            }
            EventTag::ValidationError
            | EventTag::NetworkError
            | EventTag::AuthError
            | EventTag::FileError => Channel::Error,
            EventTag::SessionStatus | EventTag::EngineStatus => Channel::Status,
        }
    }
}

impl FromStr for EventTag {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventTag::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BusError::UnknownTag { tag: s.to_string() })
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

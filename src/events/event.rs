//! # The [`Event`] sum type.
//!
//! [`Event`] is what producers hand to [`EventBus::emit`](crate::EventBus::emit):
//! one variant per channel family plus [`Event::Unrecognized`] for payloads
//! whose tag is not in the known set. The bus routes the first three. An
//! `Unrecognized` is classified again on emit: a known tag is decoded and
//! routed, anything else is absorbed with a warning.
//!
//! ## Parsing raw payloads
//! ```rust
//! use pulsebus::{Channel, Event};
//!
//! let ev = Event::from_json(r#"{"type":"project-start","projectNumber":"P-1"}"#).unwrap();
//! assert_eq!(ev.channel(), Some(Channel::Progress));
//!
//! let future = Event::from_json(r#"{"type":"bogus-event"}"#).unwrap();
//! assert!(future.is_unrecognized());
//! assert_eq!(future.tag(), "bogus-event");
//! ```

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::BusError;
use crate::events::payload::{ErrorEvent, ProgressEvent, StatusEvent};
use crate::events::tag::Channel;

/// Payload whose `type` tag is not recognized.
///
/// Kept verbatim so diagnostics can name the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawEvent(Value);

impl RawEvent {
    /// Wraps a raw JSON payload.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A bare payload carrying only `tag`.
    pub fn with_tag(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Self(json!({ "type": tag }))
    }

    /// The `type` field, or `""` if missing or not a string.
    pub fn tag(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Any event the bus accepts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Event {
    Progress(ProgressEvent),
    Error(ErrorEvent),
    Status(StatusEvent),
    /// Raw payload; delivered on emit only if its tag turns out to be known.
    Unrecognized(RawEvent),
}

impl Event {
    /// Builds an event from a JSON value.
    ///
    /// ### Errors
    /// - [`BusError::MissingTag`] when there is no string `type` field
    /// - [`BusError::Decode`] when the tag is known but the body is malformed
    ///
    /// An unknown tag is **not** an error: it yields [`Event::Unrecognized`].
    pub fn from_value(value: Value) -> Result<Self, BusError> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(BusError::MissingTag)?;

        let Some(channel) = Channel::classify(tag) else {
            return Ok(Event::Unrecognized(RawEvent(value)));
        };

        Ok(match channel {
            Channel::Progress => Event::Progress(serde_json::from_value(value)?),
            Channel::Error => Event::Error(serde_json::from_value(value)?),
            Channel::Status => Event::Status(serde_json::from_value(value)?),
        })
    }

    /// Builds an event from a JSON string; see [`Event::from_value`].
    pub fn from_json(s: &str) -> Result<Self, BusError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    /// Shorthand for an [`Event::Unrecognized`] carrying only a tag.
    pub fn unrecognized(tag: impl Into<String>) -> Self {
        Event::Unrecognized(RawEvent::with_tag(tag))
    }

    /// Wire tag of the event.
    pub fn tag(&self) -> &str {
        match self {
            Event::Progress(e) => e.tag().as_str(),
            Event::Error(e) => e.tag().as_str(),
            Event::Status(e) => e.tag().as_str(),
            Event::Unrecognized(raw) => raw.tag(),
        }
    }

    /// Channel the event routes to; `None` for unrecognized tags.
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Event::Progress(_) => Some(Channel::Progress),
            Event::Error(_) => Some(Channel::Error),
            Event::Status(_) => Some(Channel::Status),
            Event::Unrecognized(_) => None,
        }
    }

    /// Project number, when the event carries one.
    pub fn project_number(&self) -> Option<&str> {
        match self {
            Event::Progress(e) => Some(e.project_number()),
            Event::Error(e) => e.project_number.as_deref(),
            Event::Status(_) | Event::Unrecognized(_) => None,
        }
    }

    #[inline]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Event::Unrecognized(_))
    }
}

impl From<ProgressEvent> for Event {
    fn from(e: ProgressEvent) -> Self {
        Event::Progress(e)
    }
}

impl From<ErrorEvent> for Event {
    fn from(e: ErrorEvent) -> Self {
        Event::Error(e)
    }
}

impl From<StatusEvent> for Event {
    fn from(e: StatusEvent) -> Self {
        Event::Status(e)
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        Event::Unrecognized(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::payload::{ErrorKind, Progress, Status, StatusKind};
    use serde_json::json;

    #[test]
    fn test_from_value_routes_each_family() {
        let p = Event::from_value(json!({
            "type": "download-progress",
            "projectNumber": "P-1",
            "progress": {"current": 1, "total": 3, "percentage": 33}
        }))
        .unwrap();
        match p {
            Event::Progress(ProgressEvent::DownloadProgress { progress, .. }) => {
                assert_eq!(progress, Progress::new(1, 3));
            }
            other => panic!("unexpected {other:?}"),
        }

        let e = Event::from_value(json!({"type": "network-error", "message": "reset"})).unwrap();
        match e {
            Event::Error(err) => assert_eq!(err.kind, ErrorKind::Network),
            other => panic!("unexpected {other:?}"),
        }

        let s = Event::from_value(json!({"type": "session-status", "status": "stopped"})).unwrap();
        match s {
            Event::Status(st) => {
                assert_eq!(st.kind, StatusKind::Session);
                assert_eq!(st.status, Status::Stopped);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_is_soft() {
        let ev = Event::from_value(json!({"type": "bogus-event", "x": 1})).unwrap();
        assert!(ev.is_unrecognized());
        assert_eq!(ev.channel(), None);
        assert_eq!(ev.tag(), "bogus-event");
    }

    #[test]
    fn test_missing_tag_is_error() {
        let err = Event::from_value(json!({"projectNumber": "P-1"})).unwrap_err();
        assert!(matches!(err, BusError::MissingTag));
        let err = Event::from_value(json!({"type": 7})).unwrap_err();
        assert!(matches!(err, BusError::MissingTag));
    }

    #[test]
    fn test_known_tag_bad_body_is_decode_error() {
        let err = Event::from_json(r#"{"type":"project-start"}"#).unwrap_err();
        assert_eq!(err.as_label(), "bus_decode");
    }

    #[test]
    fn test_serialize_is_untagged_passthrough() {
        let ev: Event = StatusEvent::session(Status::Idle).into();
        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({"type": "session-status", "status": "idle"})
        );
        let raw = Event::unrecognized("later-event");
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!({"type": "later-event"}));
    }

    #[test]
    fn test_project_number_accessor() {
        let ev: Event = ErrorEvent::auth("expired").into();
        assert_eq!(ev.project_number(), None);
        let ev: Event = ProgressEvent::project_complete("P-9").into();
        assert_eq!(ev.project_number(), Some("P-9"));
    }
}

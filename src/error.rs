//! Error types used by the pulsebus parsing and validation helpers.
//!
//! Emission never fails: [`EventBus::emit`](crate::EventBus::emit) reports
//! delivery as a `bool` and absorbs unrecognized tags with a warning.
//! [`BusError`] is only produced at the boundary where raw payloads are turned
//! into typed events, or where a producer explicitly asks for validation.

use thiserror::Error;

/// # Errors produced at the event boundary.
///
/// These represent malformed input handed to the bus by a producer, such as a
/// JSON payload without a `type` field or progress counters that cannot yield
/// a percentage.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// The tag is not one of the known event tags.
    #[error("unknown event type: {tag}")]
    UnknownTag {
        /// The offending tag.
        tag: String,
    },

    /// The payload carries no string `type` discriminant.
    #[error("event payload has no string `type` field")]
    MissingTag,

    /// Progress counters cannot produce a percentage in `0..=100`.
    #[error("invalid progress {current}/{total}")]
    InvalidProgress {
        /// Units done.
        current: u64,
        /// Units expected.
        total: u64,
    },

    /// The tag is known but the body does not match its shape.
    #[error("malformed event payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use pulsebus::BusError;
    ///
    /// let err = BusError::UnknownTag { tag: "bogus-event".into() };
    /// assert_eq!(err.as_label(), "bus_unknown_tag");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::UnknownTag { .. } => "bus_unknown_tag",
            BusError::MissingTag => "bus_missing_tag",
            BusError::InvalidProgress { .. } => "bus_invalid_progress",
            BusError::Decode(_) => "bus_decode",
        }
    }

    /// Returns `true` when the error is about the discriminant rather than the body.
    pub fn is_tag_error(&self) -> bool {
        matches!(self, BusError::UnknownTag { .. } | BusError::MissingTag)
    }
}

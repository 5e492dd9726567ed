//! Event taxonomy: tags, channels and payloads.
//!
//! This module groups the event **data model** routed by the
//! [`EventBus`](crate::EventBus).
//!
//! ## Contents
//! - [`EventTag`], [`Channel`] closed tag set and its partition into channels
//! - [`ProgressEvent`], [`ErrorEvent`], [`StatusEvent`] per-channel payloads
//! - [`Event`] sum of the three families plus [`Event::Unrecognized`]
//!
//! ## Quick reference
//! - **Producers**: download engine (progress, errors), session manager
//!   (status, auth errors), validators (validation errors).
//! - **Consumers**: any listener registered on a channel; see `bus/mod.rs`.

mod event;
mod payload;
mod tag;

pub use event::{Event, RawEvent};
pub use payload::{
    ErrorCause, ErrorEvent, ErrorKind, Progress, ProgressEvent, Status, StatusEvent, StatusKind,
};
pub use tag::{Channel, EventTag};

//! # Async subscribers bridged onto the bus.
//!
//! Listeners registered directly on the [`EventBus`](crate::EventBus) run
//! inline and block the producer until they return. Consumers that need to
//! await (network, UI bridges, storage) implement [`Subscribe`] instead and are
//! driven by a [`SubscriberSet`] attached to the bus.
//!
//! ## Architecture
//! ```text
//! Producer ── emit(Event) ──► EventBus ──► sync listeners (inline)
//!                                 │
//!                                 └──► SubscriberSet listener ──► per-subscriber queue
//!                                                                      │
//!                                                           worker ──► Subscribe::on_event()
//! ```

mod subscribe;
mod subscriber_set;

pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;

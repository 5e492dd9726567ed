//! # Bus configuration.
//!
//! Provides [`BusConfig`], the handful of knobs an [`EventBus`](crate::EventBus)
//! reads at construction time.
//!
//! ## Sentinel values
//! - `max_listeners = 0` → unlimited (leak warning disabled)

/// Default per-channel registration count above which a leak warning is logged.
pub const DEFAULT_MAX_LISTENERS: usize = 20;

/// Configuration for an [`EventBus`](crate::EventBus).
///
/// ## Field semantics
/// - `max_listeners`: per-channel registration count that triggers a one-time
///   leak warning when exceeded (`0` = unlimited)
/// - `warn_unrecognized`: log a warning when an event with an unknown tag is emitted
///
/// ## Notes
/// All fields are public. Prefer [`BusConfig::listener_limit`] over checking
/// the `0` sentinel at call sites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Registrations per channel before a leak warning fires.
    ///
    /// Exceeding the limit never rejects a registration.
    pub max_listeners: usize,

    /// Whether unrecognized event tags produce a diagnostic warning.
    ///
    /// Unrecognized events are dropped and `emit` returns `false` either way.
    pub warn_unrecognized: bool,
}

impl BusConfig {
    /// Returns the leak-warning threshold as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → warn once when a channel holds more than `n` listeners
    #[inline]
    pub fn listener_limit(&self) -> Option<usize> {
        if self.max_listeners == 0 {
            None
        } else {
            Some(self.max_listeners)
        }
    }

    /// Sets the leak-warning threshold.
    #[must_use]
    pub fn with_max_listeners(mut self, n: usize) -> Self {
        self.max_listeners = n;
        self
    }

    /// Toggles the unrecognized-tag warning.
    #[must_use]
    pub fn with_warn_unrecognized(mut self, on: bool) -> Self {
        self.warn_unrecognized = on;
        self
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `max_listeners = 20`
    /// - `warn_unrecognized = true`
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            warn_unrecognized: true,
        }
    }
}

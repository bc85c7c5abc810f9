//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ShowerMonitor (domain)
//! ```
//!
//! Driven adapters (tap sensor, valve, clock, event sinks, config storage)
//! implement these traits.  The [`ShowerMonitor`](super::service::ShowerMonitor)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Actuator and sink calls are fire-and-forget: adapters surface their own
//! failures (log, retry, reconnect) and the core proceeds as if the command
//! was accepted.

use chrono::{DateTime, FixedOffset};

use crate::config::MonitorConfig;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Time source.  The state machine only ever sees [`now_ms`](Self::now_ms).
pub trait ClockPort {
    /// Milliseconds since boot.  Monotonic; may wrap at `u64::MAX`.
    fn now_ms(&self) -> u64;

    /// Local wall-clock time, if the platform has one.  Used only to stamp
    /// session summaries; the core sanity-checks the value before use.
    fn wall_time(&self) -> Option<DateTime<FixedOffset>> {
        None
    }
}

// ───────────────────────────────────────────────────────────────
// Tap sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait TapSensorPort {
    /// Whether hot water is currently flowing.  Polled once per tick.
    fn is_tap_active(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Enable (`true`) or cut (`false`) the hot water supply.
    fn set_tap_enabled(&mut self, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`ShowerEvent`](super::events::ShowerEvent)s through
/// this port.  Adapters decide where they go (serial log, MQTT topic, …).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ShowerEvent);
}

/// Raw topic/payload transport used by
/// [`TopicSink`](crate::adapters::topic_sink::TopicSink).
pub trait Publisher {
    fn publish(&mut self, topic: &str, payload: &str);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists monitor configuration.
///
/// Implementations MUST call [`MonitorConfig::validate`] before persisting
/// and reject out-of-range values with [`ConfigError::ValidationFailed`].
pub trait ConfigPort {
    /// Returns [`MonitorConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

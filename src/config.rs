//! Monitor configuration parameters
//!
//! All tunable parameters for shower detection and the cold-shot alert.
//! Values are loaded once at startup through a
//! [`ConfigPort`](crate::app::ports::ConfigPort) and may be replaced at
//! runtime with [`MonitorCommand::UpdateConfig`](crate::app::commands::MonitorCommand).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Tap activity must last longer than this to count as a shower (3 min).
pub const DEFAULT_MIN_SHOWER_DURATION_MS: u32 = 180_000;
/// Inactive gaps up to this long are treated as an interruption (15 s).
pub const DEFAULT_PAUSE_TOLERANCE_MS: u32 = 15_000;
/// Latency between tap-open and water actually running (5 s).
pub const DEFAULT_SETTLE_OFFSET_MS: u32 = 5_000;

/// Core monitor configuration. All durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Switches ---
    /// Master switch; when false the monitor does no work at all.
    pub monitoring_enabled: bool,
    /// Whether the cold-shot intervention is armed.
    pub alert_enabled: bool,

    // --- Alert ---
    /// Shower duration after which a cold shot is issued.
    pub alert_trigger_ms: u32,
    /// How long the hot water stays cut during a cold shot.
    pub coldshot_duration_ms: u32,

    // --- Detection thresholds ---
    pub min_shower_duration_ms: u32,
    pub pause_tolerance_ms: u32,
    pub settle_offset_ms: u32,

    // --- Timing ---
    /// Scheduler tick period.
    pub poll_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            monitoring_enabled: true,
            alert_enabled: false,

            alert_trigger_ms: 7 * 60_000, // 7 min
            coldshot_duration_ms: 10_000, // 10 s

            min_shower_duration_ms: DEFAULT_MIN_SHOWER_DURATION_MS,
            pause_tolerance_ms: DEFAULT_PAUSE_TOLERANCE_MS,
            settle_offset_ms: DEFAULT_SETTLE_OFFSET_MS,

            poll_interval_ms: 1000, // 1 Hz
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(60_000..=7_200_000).contains(&self.alert_trigger_ms) {
            return Err(ConfigError::ValidationFailed(
                "alert_trigger_ms must be 60000–7200000",
            ));
        }
        if !(1_000..=600_000).contains(&self.coldshot_duration_ms) {
            return Err(ConfigError::ValidationFailed(
                "coldshot_duration_ms must be 1000–600000",
            ));
        }
        if !(10_000..=3_600_000).contains(&self.min_shower_duration_ms) {
            return Err(ConfigError::ValidationFailed(
                "min_shower_duration_ms must be 10000–3600000",
            ));
        }
        if !(1_000..=300_000).contains(&self.pause_tolerance_ms) {
            return Err(ConfigError::ValidationFailed(
                "pause_tolerance_ms must be 1000–300000",
            ));
        }
        if self.settle_offset_ms >= self.min_shower_duration_ms {
            return Err(ConfigError::ValidationFailed(
                "settle_offset_ms must be < min_shower_duration_ms",
            ));
        }
        if !(100..=5000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 100–5000",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// User-facing settings
// ---------------------------------------------------------------------------

/// Settings as an installer enters them: alert trigger in minutes,
/// cold-shot length in seconds.  Detection thresholds keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowerSettings {
    pub monitoring: bool,
    pub alert: bool,
    pub alert_trigger_mins: u16,
    pub coldshot_secs: u16,
}

impl Default for ShowerSettings {
    fn default() -> Self {
        Self {
            monitoring: true,
            alert: false,
            alert_trigger_mins: 7,
            coldshot_secs: 10,
        }
    }
}

impl From<ShowerSettings> for MonitorConfig {
    fn from(s: ShowerSettings) -> Self {
        Self {
            monitoring_enabled: s.monitoring,
            alert_enabled: s.alert,
            alert_trigger_ms: u32::from(s.alert_trigger_mins) * 60_000,
            coldshot_duration_ms: u32::from(s.coldshot_secs) * 1000,
            ..Self::default()
        }
    }
}

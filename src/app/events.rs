//! Outbound monitor events.
//!
//! The [`ShowerMonitor`](super::service::ShowerMonitor) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide how they are serialized and where they go.

use core::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Formatted local timestamp, `%FT%T%z` (e.g. `2024-03-01T07:15:42+0100`).
pub type WallTimestamp = heapless::String<32>;

/// Wall time at or before this unix second is treated as "never synced"
/// (2019-12-20, well before any deployed firmware build).
pub const WALL_CLOCK_SANITY_SECS: i64 = 1_576_800_000;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowerEvent {
    /// Shower recognized (`true`) or finished (`false`).
    StateChanged { active: bool },

    /// A recognized shower ended.  `timestamp` is absent when the wall
    /// clock is unavailable or implausible.
    SessionSummary {
        duration_seconds: u64,
        timestamp: Option<WallTimestamp>,
    },
}

/// Format `wall` for a session summary, or `None` if the clock has not
/// been synced yet.
pub fn format_wall_time(wall: &DateTime<FixedOffset>) -> Option<WallTimestamp> {
    if wall.timestamp() <= WALL_CLOCK_SANITY_SECS {
        return None;
    }
    let mut out = WallTimestamp::new();
    write!(out, "{}", wall.format("%FT%T%z")).ok()?;
    Some(out)
}

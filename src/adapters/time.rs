//! System clock adapter.
//!
//! Implements [`ClockPort`] for the monitor.
//!
//! - **`espidf` feature on an `espidf` target**: uptime from
//!   `esp_timer_get_time()` (microsecond precision, monotonic, unaffected
//!   by SNTP adjustments).
//! - **Otherwise**: `std::time::Instant`, for host-side testing and
//!   simulation.
//!
//! Wall time comes from the C library's local time on both targets; the
//! core discards it until SNTP has set a plausible date.

use chrono::{DateTime, FixedOffset, Local};

use crate::app::ports::ClockPort;

pub struct SystemClock {
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    /// Milliseconds since boot (monotonic).
    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn now_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions once the
        // esp_timer service is up, which ESP-IDF does before app_main.
        (unsafe { esp_idf_sys::esp_timer_get_time() }) as u64 / 1000
    }

    /// Milliseconds since the adapter was created (monotonic).
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn wall_time(&self) -> Option<DateTime<FixedOffset>> {
        Some(Local::now().fixed_offset())
    }
}

//! Mock hardware adapters for integration tests.
//!
//! Records every valve command and emitted event so tests can assert on
//! the full history without touching real GPIO.

use std::cell::Cell;

use showerwatch::app::events::ShowerEvent;
use showerwatch::app::ports::{ActuatorPort, ClockPort, EventSink, TapSensorPort};

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn at(ms: u64) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub tap_active: bool,
    /// Every `set_tap_enabled` argument, in call order.
    pub valve_calls: Vec<bool>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            tap_active: false,
            valve_calls: Vec::new(),
        }
    }

    pub fn cuts(&self) -> usize {
        self.valve_calls.iter().filter(|on| !**on).count()
    }

    pub fn restores(&self) -> usize {
        self.valve_calls.iter().filter(|on| **on).count()
    }

    /// Hot water state implied by the last command (enabled at boot).
    pub fn hot_water_enabled(&self) -> bool {
        self.valve_calls.last().copied().unwrap_or(true)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl TapSensorPort for MockHardware {
    fn is_tap_active(&mut self) -> bool {
        self.tap_active
    }
}

impl ActuatorPort for MockHardware {
    fn set_tap_enabled(&mut self, enabled: bool) {
        self.valve_calls.push(enabled);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<ShowerEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn state_changes(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ShowerEvent::StateChanged { active } => Some(*active),
                ShowerEvent::SessionSummary { .. } => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ShowerEvent::SessionSummary {
                    duration_seconds, ..
                } => Some(*duration_seconds),
                ShowerEvent::StateChanged { .. } => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ShowerEvent) {
        self.events.push(event.clone());
    }
}

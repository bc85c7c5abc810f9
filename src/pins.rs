//! GPIO pin assignments for the shower monitor board.
//!
//! Single source of truth — the firmware entry point references this
//! module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Digital input from the hot water flow switch.
/// Open-drain with pull-up: LOW = water flowing.
pub const TAP_SENSE_GPIO: i32 = 4;
/// Flow switch polarity matching [`TAP_SENSE_GPIO`] wiring.
pub const TAP_SENSE_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Relay driving the hot water solenoid valve.
/// HIGH = hot water enabled (relay de-energised fails safe to HIGH via pull-up).
pub const HOT_WATER_VALVE_GPIO: i32 = 5;

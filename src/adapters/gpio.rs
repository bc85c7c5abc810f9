//! GPIO adapters — tap sense input and hot water valve relay.
//!
//! Generic over `embedded-hal` 1.0 digital traits so the same code runs
//! on `esp_idf_hal::gpio::PinDriver` in firmware and on plain fakes in
//! tests.
//!
//! ## Safety contract
//!
//! The valve relay is wired normally-closed: pin **high** = hot water
//! enabled.  A dead board therefore fails with hot water available.
//!
//! GPIO errors are logged and swallowed; the monitor treats actuator
//! commands as fire-and-forget.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ActuatorPort, TapSensorPort};

// ── Tap sensor ────────────────────────────────────────────────

/// Digital "hot water flowing" input (flow switch or boiler status line).
pub struct GpioTapSensor<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> GpioTapSensor<P> {
    /// `active_low`: the line reads low while water flows (open-drain
    /// flow switches with pull-up).
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }
}

impl<P: InputPin> TapSensorPort for GpioTapSensor<P> {
    fn is_tap_active(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(e) => {
                // An unreadable line is treated as "no flow": the session
                // pauses rather than being extended on bad data.
                warn!("tap sense read failed: {:?}", e.kind());
                false
            }
        }
    }
}

// ── Valve relay ───────────────────────────────────────────────

pub struct GpioTapValve<P> {
    pin: P,
    enabled: bool,
}

impl<P: OutputPin> GpioTapValve<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, enabled: true }
    }

    /// Last commanded state.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<P: OutputPin> ActuatorPort for GpioTapValve<P> {
    fn set_tap_enabled(&mut self, enabled: bool) {
        let res = if enabled {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = res {
            warn!("valve write failed (enable={}): {:?}", enabled, e.kind());
        }
        self.enabled = enabled;
    }
}

// ── Combined ──────────────────────────────────────────────────

/// Both GPIO adapters behind one value, so it can be passed as the
/// `TapSensorPort + ActuatorPort` argument of
/// [`ShowerMonitor::tick`](crate::app::service::ShowerMonitor::tick).
pub struct GpioHardware<I, O> {
    pub sensor: GpioTapSensor<I>,
    pub valve: GpioTapValve<O>,
}

impl<I: InputPin, O: OutputPin> GpioHardware<I, O> {
    pub fn new(sensor: GpioTapSensor<I>, valve: GpioTapValve<O>) -> Self {
        Self { sensor, valve }
    }
}

impl<I: InputPin, O: OutputPin> TapSensorPort for GpioHardware<I, O> {
    fn is_tap_active(&mut self) -> bool {
        self.sensor.is_tap_active()
    }
}

impl<I: InputPin, O: OutputPin> ActuatorPort for GpioHardware<I, O> {
    fn set_tap_enabled(&mut self, enabled: bool) {
        self.valve.set_tap_enabled(enabled);
    }
}

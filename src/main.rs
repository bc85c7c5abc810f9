//! ShowerWatch Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  GpioHardware        LogEventSink   NvsConfigStore           │
//! │  (TapSensor+Valve)   (EventSink)    (ConfigPort)             │
//! │  SystemClock (ClockPort)                                     │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            ShowerMonitor (pure logic)                  │  │
//! │  │  fsm::step · cold-shot alert                           │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use log::{info, warn};

use showerwatch::adapters::gpio::{GpioHardware, GpioTapSensor, GpioTapValve};
use showerwatch::adapters::log_sink::LogEventSink;
use showerwatch::adapters::nvs::NvsConfigStore;
use showerwatch::adapters::time::SystemClock;
use showerwatch::app::ports::ConfigPort;
use showerwatch::app::service::ShowerMonitor;
use showerwatch::config::MonitorConfig;
use showerwatch::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ShowerWatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let store = match NvsConfigStore::new() {
        Ok(s) => s,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            NvsConfigStore::default()
        }
    };
    let config = match store.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config load failed ({}), using defaults", e);
            MonitorConfig::default()
        }
    };

    // ── 3. Construct adapters ─────────────────────────────────
    // SAFETY: each GPIO number is claimed exactly once, here, and no
    // other driver in the firmware touches these pins.
    let tap_pin = unsafe { AnyIOPin::new(pins::TAP_SENSE_GPIO) };
    let valve_pin = unsafe { AnyOutputPin::new(pins::HOT_WATER_VALVE_GPIO) };

    let mut tap_in = PinDriver::input(tap_pin)?;
    tap_in.set_pull(Pull::Up)?;
    let valve_out = PinDriver::output(valve_pin)?;

    let mut hw = GpioHardware::new(
        GpioTapSensor::new(tap_in, pins::TAP_SENSE_ACTIVE_LOW),
        GpioTapValve::new(valve_out),
    );
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    // ── 4. Start the monitor ──────────────────────────────────
    let poll = std::time::Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut monitor = ShowerMonitor::new(config);
    monitor.start(&mut hw, &mut sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        monitor.tick(&clock, &mut hw, &mut sink);
        std::thread::sleep(poll);
    }
}

//! Fuzz target: `fsm::step`
//!
//! Interprets the input as a trace of (tap, clock delta) samples and drives
//! it through the transition function, checking that the session fields
//! stay consistent and that every valve cut is paired with one restore.
//!
//! cargo fuzz run fuzz_tap_trace

#![no_main]

use libfuzzer_sys::fuzz_target;
use showerwatch::config::MonitorConfig;
use showerwatch::fsm::context::{ShowerSession, TickInput};
use showerwatch::fsm::{Effect, Uptime, step};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, trace)) = data.split_first() else {
        return;
    };
    let config = MonitorConfig {
        alert_enabled: flags & 1 != 0,
        alert_trigger_ms: 60_000,
        coldshot_duration_ms: 5_000,
        min_shower_duration_ms: 10_000,
        pause_tolerance_ms: 1_000,
        settle_offset_ms: 2_000,
        ..MonitorConfig::default()
    };

    let mut session = ShowerSession::default();
    let mut now = u64::MAX - 500_000;
    let mut cut = false;

    for chunk in trace.chunks(3) {
        let [tap, hi, lo] = chunk else { break };
        now = now.wrapping_add(u64::from(u16::from_be_bytes([*hi, *lo])));
        let s = step(
            &session,
            &config,
            TickInput {
                tap_active: tap & 1 != 0,
                now: Uptime(now),
            },
        );
        session = s.session;
        for e in &s.effects {
            if let Effect::Actuate { tap_enabled } = e {
                assert_ne!(*tap_enabled, !cut, "valve command repeated");
                cut = !*tap_enabled;
            }
        }
        assert_eq!(cut, session.cold_shot_active);
        if session.start_time.is_none() {
            assert!(!session.recognized && !session.cold_shot_active);
        }
    }
});

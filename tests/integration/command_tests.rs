//! Command surface tests: cold-shot requests, state republish, runtime
//! config and status queries.

use super::mock_hw::{MockClock, MockHardware, RecordingSink};

use showerwatch::app::commands::{CommandReply, MonitorCommand};
use showerwatch::app::events::ShowerEvent;
use showerwatch::app::ports::ClockPort;
use showerwatch::app::service::ShowerMonitor;
use showerwatch::config::MonitorConfig;
use showerwatch::fsm::{Phase, Uptime};

fn tick_for(
    monitor: &mut ShowerMonitor,
    clock: &MockClock,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    secs: u64,
) {
    for _ in 0..secs {
        monitor.tick(clock, hw, sink);
        clock.advance(1000);
    }
}

fn send(
    monitor: &mut ShowerMonitor,
    clock: &MockClock,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    cmd: MonitorCommand,
) -> CommandReply {
    monitor.handle_command(cmd, Uptime(clock.now_ms()), hw, sink)
}

#[test]
fn cold_shot_rejected_when_no_shower() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 30);

    let reply = send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::ColdShot);
    assert!(!reply.is_ok());
    assert_eq!(reply.message(), "Coldshot failed. Shower not active");

    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 300);
    assert_eq!(hw.cuts(), 0, "rejected request must not cut later");
}

#[test]
fn cold_shot_accepted_during_shower() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 200);

    let reply = send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::ColdShot);
    assert_eq!(reply, CommandReply::Ok);
    assert_eq!(reply.message(), "OK");
    // Nothing happens until the next tick.
    assert!(hw.valve_calls.is_empty());

    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 1);
    assert_eq!(hw.valve_calls, vec![false]);

    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 20);
    assert_eq!(hw.valve_calls, vec![false, true]);
}

#[test]
fn pending_cold_shot_dropped_when_session_ends() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 200);
    hw.tap_active = false;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 1);

    // Requested while paused; the session then times out.
    assert!(send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::ColdShot).is_ok());
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 30);
    assert_eq!(monitor.phase(), Phase::Idle);
    assert!(!monitor.session().force_cold_shot);

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 60);
    assert_eq!(hw.cuts(), 0);
}

#[test]
fn publish_state_repeats_current_state() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let reply = send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::PublishState);
    assert_eq!(reply, CommandReply::Ok);

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 200);
    send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::PublishState);
    send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::PublishState);

    assert_eq!(sink.state_changes(), vec![false, true, true, true]);
}

#[test]
fn invalid_config_is_rejected_and_not_applied() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let bad = MonitorConfig {
        alert_trigger_ms: 5_000,
        ..MonitorConfig::default()
    };
    let reply = send(
        &mut monitor,
        &clock,
        &mut hw,
        &mut sink,
        MonitorCommand::UpdateConfig(bad),
    );
    assert_eq!(
        reply,
        CommandReply::Rejected {
            message: "alert_trigger_ms must be 60000–7200000"
        }
    );
    assert_eq!(monitor.config(), &MonitorConfig::default());
}

#[test]
fn valid_config_applies_immediately() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 250);
    assert_eq!(hw.cuts(), 0);

    let cfg = MonitorConfig {
        alert_enabled: true,
        alert_trigger_ms: 240_000,
        ..MonitorConfig::default()
    };
    let reply = send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::UpdateConfig(cfg));
    assert!(reply.is_ok());

    // Already past the new trigger.
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 1);
    assert_eq!(hw.valve_calls, vec![false]);
}

#[test]
fn get_status_reports_session() {
    let mut monitor = ShowerMonitor::new(MonitorConfig::default());
    let clock = MockClock::at(0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    match send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::GetStatus) {
        CommandReply::Status(s) => {
            assert_eq!(s.phase, Phase::Idle);
            assert_eq!(s.elapsed_secs, None);
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    hw.tap_active = true;
    tick_for(&mut monitor, &clock, &mut hw, &mut sink, 200);
    match send(&mut monitor, &clock, &mut hw, &mut sink, MonitorCommand::GetStatus) {
        CommandReply::Status(s) => {
            assert_eq!(s.phase, Phase::Showering);
            assert!(s.monitoring_enabled);
            assert!(!s.alert_enabled);
            assert!(!s.cold_shot_active);
            assert_eq!(s.elapsed_secs, Some(200));
        }
        other => panic!("unexpected reply: {other:?}"),
    }
    assert!(
        sink.events
            .iter()
            .all(|e| matches!(e, ShowerEvent::StateChanged { .. }))
    );
}

#[test]
fn replies_serialize_with_result_tag() {
    let ok = serde_json::to_value(CommandReply::Ok).unwrap();
    assert_eq!(ok, serde_json::json!({ "result": "ok" }));

    let rejected = serde_json::to_value(CommandReply::Rejected {
        message: "Coldshot failed. Shower not active",
    })
    .unwrap();
    assert_eq!(rejected["result"], "rejected");
    assert_eq!(rejected["message"], "Coldshot failed. Shower not active");
}

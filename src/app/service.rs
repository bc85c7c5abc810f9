//! Shower monitor service — the hexagonal core driver.
//!
//! [`ShowerMonitor`] owns the configuration and the [`ShowerSession`].
//! Each tick it reads the ports, runs the pure [`fsm::step`], and applies
//! the returned effects.  All I/O flows through port traits injected at
//! call sites, making the service testable with mock adapters.
//!
//! ```text
//!   ClockPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//! TapSensorPort ──▶│     ShowerMonitor      │
//!  ActuatorPort ◀──│  fsm::step · effects   │
//!                 └────────────────────────┘
//! ```
//!
//! Single-threaded: `tick`, `request_cold_shot`, and `handle_command` all
//! take `&mut self` and must run on the same execution context.

use log::{info, warn};
use serde::Serialize;

use crate::config::MonitorConfig;
use crate::error::RequestError;
use crate::fsm::context::{ShowerSession, TickInput};
use crate::fsm::{self, Effect, Phase, Uptime};

use super::commands::{CommandReply, MonitorCommand};
use super::events::{ShowerEvent, format_wall_time};
use super::ports::{ActuatorPort, ClockPort, EventSink, TapSensorPort};

/// Point-in-time view of the monitor for status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorStatus {
    pub phase: Phase,
    pub monitoring_enabled: bool,
    pub alert_enabled: bool,
    pub cold_shot_active: bool,
    /// Seconds since the current session started.
    pub elapsed_secs: Option<u64>,
}

// ───────────────────────────────────────────────────────────────
// ShowerMonitor
// ───────────────────────────────────────────────────────────────

pub struct ShowerMonitor {
    config: MonitorConfig,
    session: ShowerSession,
    tick_count: u64,
}

impl ShowerMonitor {
    /// Does **not** touch any port; call [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            session: ShowerSession::default(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the outputs to a known state after boot.
    ///
    /// Hot water is re-enabled unconditionally: a restart in the middle
    /// of a cold shot must never leave the occupant without hot water.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_tap_enabled(true);
        if self.config.monitoring_enabled {
            self.force_state_change(sink);
        }
        info!(
            "ShowerMonitor started (monitoring={}, alert={})",
            self.config.monitoring_enabled, self.config.alert_enabled
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one polling cycle: read tap + clock → step → apply effects.
    ///
    /// The `hw` parameter satisfies **both** [`TapSensorPort`] and
    /// [`ActuatorPort`] so one adapter can own the GPIO pair.
    pub fn tick(
        &mut self,
        clock: &impl ClockPort,
        hw: &mut (impl TapSensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        if !self.config.monitoring_enabled {
            return;
        }
        self.tick_count += 1;

        let input = TickInput {
            tap_active: hw.is_tap_active(),
            now: Uptime(clock.now_ms()),
        };
        let step = fsm::step(&self.session, &self.config, input);
        self.session = step.session;

        for effect in step.effects {
            self.apply(effect, clock, hw, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Ask for an immediate cold shot.  Consumed on the next tick with the
    /// tap running; rejected without side effects unless a shower is
    /// recognized.
    pub fn request_cold_shot(&mut self) -> Result<(), RequestError> {
        info!("Forcing coldshot...");
        if self.session.recognized {
            self.session.force_cold_shot = true;
            Ok(())
        } else {
            self.session.force_cold_shot = false;
            warn!("Coldshot failed. Shower not active");
            Err(RequestError::NotActive)
        }
    }

    /// Republish the current recognized state whether or not it changed.
    pub fn force_state_change(&self, sink: &mut impl EventSink) {
        sink.emit(&ShowerEvent::StateChanged {
            active: self.session.recognized,
        });
    }

    /// Process an external command and reply synchronously.
    pub fn handle_command(
        &mut self,
        cmd: MonitorCommand,
        now: Uptime,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> CommandReply {
        match cmd {
            MonitorCommand::ColdShot => match self.request_cold_shot() {
                Ok(()) => CommandReply::Ok,
                Err(e) => e.into(),
            },
            MonitorCommand::PublishState => {
                self.force_state_change(sink);
                CommandReply::Ok
            }
            MonitorCommand::UpdateConfig(config) => match self.update_config(config, hw, sink) {
                Ok(()) => CommandReply::Ok,
                Err(e) => e.into(),
            },
            MonitorCommand::GetStatus => CommandReply::Status(self.status(now)),
        }
    }

    /// Validate and swap in a new configuration.
    ///
    /// Turning monitoring or alerting off while hot water is cut restores
    /// it immediately.  Turning monitoring off drops the session; a
    /// recognized shower is reported as finished, without a summary.
    pub fn update_config(
        &mut self,
        config: MonitorConfig,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<(), crate::app::ports::ConfigError> {
        config.validate()?;

        if self.session.cold_shot_active && !(config.monitoring_enabled && config.alert_enabled) {
            self.session.cold_shot_active = false;
            self.session.force_cold_shot = false;
            self.session.alert_timer_start = None;
            hw.set_tap_enabled(true);
            info!("shower alert cancelled by config update");
        }

        if !config.monitoring_enabled && self.session.start_time.is_some() {
            let was_recognized = self.session.recognized;
            self.session = ShowerSession::default();
            if was_recognized {
                sink.emit(&ShowerEvent::StateChanged { active: false });
            }
        }

        self.config = config;
        info!("Configuration updated at runtime");
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self, now: Uptime) -> MonitorStatus {
        MonitorStatus {
            phase: self.phase(),
            monitoring_enabled: self.config.monitoring_enabled,
            alert_enabled: self.config.alert_enabled,
            cold_shot_active: self.session.cold_shot_active,
            elapsed_secs: self.session.elapsed_ms(now).map(|ms| ms / 1000),
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn session(&self) -> &ShowerSession {
        &self.session
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Ticks executed while monitoring was enabled.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply(
        &self,
        effect: Effect,
        clock: &impl ClockPort,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match effect {
            Effect::Actuate { tap_enabled } => hw.set_tap_enabled(tap_enabled),
            Effect::Emit(ShowerEvent::SessionSummary {
                duration_seconds, ..
            }) => {
                let timestamp = clock.wall_time().as_ref().and_then(format_wall_time);
                match &timestamp {
                    Some(ts) => info!("shower finished (duration {} s, at {})", duration_seconds, ts),
                    None => info!("shower finished (duration {} s)", duration_seconds),
                }
                sink.emit(&ShowerEvent::SessionSummary {
                    duration_seconds,
                    timestamp,
                });
            }
            Effect::Emit(event) => sink.emit(&event),
        }
    }
}

//! Session state and the per-step context threaded through every phase handler.
//!
//! [`ShowerSession`] is the only mutable state the monitor owns.  Phase
//! handlers receive a [`StepContext`] holding a working copy of the
//! session, the tick input, the configuration, and an effect buffer they
//! append to.  Nothing here performs I/O.

use serde::Serialize;

use crate::app::events::ShowerEvent;
use crate::config::MonitorConfig;

use super::Phase;

// ---------------------------------------------------------------------------
// Monotonic timestamp
// ---------------------------------------------------------------------------

/// Milliseconds since boot, as read from [`ClockPort::now_ms`](crate::app::ports::ClockPort::now_ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Uptime(pub u64);

impl Uptime {
    /// Milliseconds from `earlier` to `self`, correct across counter wraparound.
    pub const fn since(self, earlier: Uptime) -> u64 {
        self.0.wrapping_sub(earlier.0)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Mutable state of the shower currently being observed.
///
/// `Default` is the idle, no-session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowerSession {
    /// When continuous tap activity began; `None` = no session in progress.
    pub start_time: Option<Uptime>,
    /// When activity stopped during a tentative pause.
    pub pause_time: Option<Uptime>,
    /// When the current cold shot began.
    pub alert_timer_start: Option<Uptime>,
    /// Activity has crossed the minimum shower duration.
    pub recognized: bool,
    /// Hot water is currently cut.
    pub cold_shot_active: bool,
    /// One-shot external request for an immediate cold shot.
    pub force_cold_shot: bool,
}

impl ShowerSession {
    /// Phase implied by the session fields.
    pub fn phase(&self) -> Phase {
        if self.cold_shot_active {
            Phase::ColdShot
        } else if self.recognized {
            Phase::Showering
        } else if self.start_time.is_some() {
            Phase::Detecting
        } else {
            Phase::Idle
        }
    }

    /// Milliseconds since the session started, if one is running.
    pub fn elapsed_ms(&self, now: Uptime) -> Option<u64> {
        self.start_time.map(|start| now.since(start))
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Everything a single step observes from the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    pub tap_active: bool,
    pub now: Uptime,
}

/// Side effects requested by a step, applied in order by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Command the hot water valve.
    Actuate { tap_enabled: bool },
    /// Publish an event.  Session summaries leave `timestamp` unset; the
    /// driver stamps them.
    Emit(ShowerEvent),
}

/// Upper bound on effects from one step: summary + state change on
/// session end is the largest case.
pub const MAX_EFFECTS: usize = 4;

pub type Effects = heapless::Vec<Effect, MAX_EFFECTS>;

// ---------------------------------------------------------------------------
// StepContext
// ---------------------------------------------------------------------------

/// The working context passed to every phase handler.
pub struct StepContext<'a> {
    /// Working copy of the session; becomes the next state.
    pub session: ShowerSession,
    pub input: TickInput,
    pub config: &'a MonitorConfig,
    pub effects: Effects,
}

impl<'a> StepContext<'a> {
    pub fn new(session: ShowerSession, input: TickInput, config: &'a MonitorConfig) -> Self {
        Self {
            session,
            input,
            config,
            effects: Effects::new(),
        }
    }

    pub fn now(&self) -> Uptime {
        self.input.now
    }

    /// Queue a side effect.
    pub fn push(&mut self, effect: Effect) {
        // No handler queues more than MAX_EFFECTS in one step.
        let pushed = self.effects.push(effect);
        debug_assert!(pushed.is_ok(), "effect buffer overflow");
    }
}

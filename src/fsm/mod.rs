//! Function-pointer state machine for shower detection.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  PhaseTable                                  │
//! │  ┌───────────┬────────────────────────────┐  │
//! │  │ Phase     │ on_update                  │  │
//! │  ├───────────┼────────────────────────────┤  │
//! │  │ Idle      │ fn(ctx) -> Option<Phase>   │  │
//! │  │ Detecting │ fn(ctx) -> Option<Phase>   │  │
//! │  │ Showering │ fn(ctx) -> Option<Phase>   │  │
//! │  │ ColdShot  │ fn(ctx) -> Option<Phase>   │  │
//! │  └───────────┴────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`step`] is pure: it copies the session into a [`StepContext`], runs
//! the handler for the current phase, and hands back the next session
//! together with the [`Effect`]s the driver must apply.  The phase is
//! never stored; it is derived from the session fields each time, so the
//! table cannot drift out of sync with the data.

pub mod context;
pub mod states;

use log::debug;
use serde::Serialize;

use crate::config::MonitorConfig;
use context::{Effects, ShowerSession, StepContext, TickInput};

pub use context::{Effect, Uptime};

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    /// No tap activity; rest state between sessions.
    Idle = 0,
    /// Tap on, not yet long enough to be a shower.
    Detecting = 1,
    /// Recognized shower.
    Showering = 2,
    /// Hot water cut for a cold shot.
    ColdShot = 3,
}

impl Phase {
    pub const COUNT: usize = 4;

    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Detecting => "Detecting",
            Self::Showering => "Showering",
            Self::ColdShot => "ColdShot",
        }
    }
}

// ---------------------------------------------------------------------------
// Phase table
// ---------------------------------------------------------------------------

/// Per-tick handler.  Returns `Some(next)` when the step changed phase.
pub type PhaseUpdateFn = fn(&mut StepContext<'_>) -> Option<Phase>;

pub struct PhaseDescriptor {
    pub phase: Phase,
    pub on_update: PhaseUpdateFn,
}

static PHASE_TABLE: [PhaseDescriptor; Phase::COUNT] = states::build_phase_table();

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Result of one step of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Session to carry into the next tick.
    pub session: ShowerSession,
    /// Side effects, in the order they must be applied.
    pub effects: Effects,
    /// `(from, to)` when the phase changed.
    pub transition: Option<(Phase, Phase)>,
}

impl Step {
    fn unchanged(session: ShowerSession) -> Self {
        Self {
            session,
            effects: Effects::new(),
            transition: None,
        }
    }
}

/// Advance the state machine by one tick.
///
/// With monitoring disabled the session is returned untouched and no
/// effects are produced.
pub fn step(session: &ShowerSession, config: &MonitorConfig, input: TickInput) -> Step {
    if !config.monitoring_enabled {
        return Step::unchanged(*session);
    }

    let from = session.phase();
    let mut ctx = StepContext::new(*session, input, config);
    let next = (PHASE_TABLE[from as usize].on_update)(&mut ctx);

    let transition = next.map(|to| {
        debug_assert_eq!(to, ctx.session.phase(), "handler reported wrong phase");
        debug!("shower phase: {} -> {}", from.name(), to.name());
        (from, to)
    });

    Step {
        session: ctx.session,
        effects: ctx.effects,
        transition,
    }
}

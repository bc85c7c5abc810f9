//! Concrete phase handlers and table builder.
//!
//! ```text
//!  IDLE ──[tap on]──▶ DETECTING ──[on > min duration]──▶ SHOWERING
//!    ▲                    │                               │     ▲
//!    │                    │                  [alert due /  │     │ [cold shot
//!    │                    │                    forced]    ▼     │  elapsed]
//!    │                    │                            COLD_SHOT─┘
//!    │                    │                               │
//!    └──────[off > pause tolerance]───────────────────────┘
//!                                       (from DETECTING or SHOWERING)
//! ```
//!
//! Handlers only mutate the working session in the [`StepContext`] and
//! queue [`Effect`]s; the driver applies them afterwards.

use log::{debug, info};

use super::context::{Effect, ShowerSession, StepContext};
use super::{Phase, PhaseDescriptor};
use crate::app::events::ShowerEvent;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub const fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        PhaseDescriptor {
            phase: Phase::Idle,
            on_update: idle_update,
        },
        PhaseDescriptor {
            phase: Phase::Detecting,
            on_update: detecting_update,
        },
        PhaseDescriptor {
            phase: Phase::Showering,
            on_update: showering_update,
        },
        PhaseDescriptor {
            phase: Phase::ColdShot,
            on_update: cold_shot_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut StepContext<'_>) -> Option<Phase> {
    if !ctx.input.tap_active {
        return None;
    }
    ctx.session = ShowerSession {
        start_time: Some(ctx.now()),
        ..ShowerSession::default()
    };
    debug!("hot water started");
    Some(Phase::Detecting)
}

// ═══════════════════════════════════════════════════════════════════════════
//  DETECTING
// ═══════════════════════════════════════════════════════════════════════════

fn detecting_update(ctx: &mut StepContext<'_>) -> Option<Phase> {
    if !ctx.input.tap_active {
        return tap_off(ctx);
    }
    ctx.session.pause_time = None;

    let elapsed = ctx.session.elapsed_ms(ctx.now()).unwrap_or(0);
    if elapsed > u64::from(ctx.config.min_shower_duration_ms) {
        ctx.session.recognized = true;
        ctx.push(Effect::Emit(ShowerEvent::StateChanged { active: true }));
        debug!("hot water still running, starting shower timer");
        return Some(Phase::Showering);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHOWERING
// ═══════════════════════════════════════════════════════════════════════════

fn showering_update(ctx: &mut StepContext<'_>) -> Option<Phase> {
    if !ctx.input.tap_active {
        return tap_off(ctx);
    }
    ctx.session.pause_time = None;

    let due = alert_due(ctx);
    if !due && !ctx.session.force_cold_shot {
        return None;
    }

    ctx.session.cold_shot_active = true;
    ctx.session.force_cold_shot = false;
    ctx.session.alert_timer_start = Some(ctx.now());
    ctx.push(Effect::Actuate { tap_enabled: false });
    info!("shower alert started");
    Some(Phase::ColdShot)
}

/// Once past the trigger, every tap-active tick outside a cold shot is due.
fn alert_due(ctx: &StepContext<'_>) -> bool {
    ctx.config.alert_enabled
        && ctx
            .session
            .elapsed_ms(ctx.now())
            .is_some_and(|elapsed| elapsed > u64::from(ctx.config.alert_trigger_ms))
}

// ═══════════════════════════════════════════════════════════════════════════
//  COLD_SHOT
// ═══════════════════════════════════════════════════════════════════════════

/// The tap signal is ignored while the hot water is cut.
fn cold_shot_update(ctx: &mut StepContext<'_>) -> Option<Phase> {
    let started = ctx.session.alert_timer_start.unwrap_or(ctx.now());
    if ctx.now().since(started) < u64::from(ctx.config.coldshot_duration_ms) {
        return None;
    }
    ctx.session.cold_shot_active = false;
    ctx.session.force_cold_shot = false;
    ctx.push(Effect::Actuate { tap_enabled: true });
    info!("shower alert stopped");
    Some(Phase::Showering)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared: tap turned off during a session
// ═══════════════════════════════════════════════════════════════════════════

fn tap_off(ctx: &mut StepContext<'_>) -> Option<Phase> {
    let now = ctx.now();
    let start = ctx.session.start_time?;
    let pause = *ctx.session.pause_time.get_or_insert(now);

    if now.since(pause) <= u64::from(ctx.config.pause_tolerance_ms) {
        return None;
    }

    // Session over.  Offset is subtracted unconditionally, clamped at zero.
    let duration_ms = pause
        .since(start)
        .saturating_sub(u64::from(ctx.config.settle_offset_ms));
    if duration_ms > u64::from(ctx.config.min_shower_duration_ms) {
        ctx.push(Effect::Emit(ShowerEvent::SessionSummary {
            duration_seconds: duration_ms / 1000,
            timestamp: None,
        }));
    }

    let was_recognized = ctx.session.recognized;
    ctx.session = ShowerSession::default();
    if was_recognized {
        ctx.push(Effect::Emit(ShowerEvent::StateChanged { active: false }));
    }
    debug!("hot water session ended after {} ms", duration_ms);
    Some(Phase::Idle)
}

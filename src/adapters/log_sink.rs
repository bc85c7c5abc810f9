//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`ShowerEvent`] as a one-line
//! record to the logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::ShowerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ShowerEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ShowerEvent) {
        match event {
            ShowerEvent::StateChanged { active } => {
                info!("SHOWER | active={}", active);
            }
            ShowerEvent::SessionSummary {
                duration_seconds,
                timestamp: Some(ts),
            } => {
                info!("SHOWER | finished duration={}s at={}", duration_seconds, ts);
            }
            ShowerEvent::SessionSummary {
                duration_seconds,
                timestamp: None,
            } => {
                info!("SHOWER | finished duration={}s", duration_seconds);
            }
        }
    }
}

//! Topic/payload event sink adapter.
//!
//! Renders [`ShowerEvent`]s into the topic layout consumed by home
//! automation brokers and hands them to a [`Publisher`]:
//!
//! | Event            | Topic           | Payload                                  |
//! |------------------|-----------------|------------------------------------------|
//! | `StateChanged`   | `shower_active` | `true` / `false`                         |
//! | `SessionSummary` | `shower_data`   | `{"duration":195,"timestamp":"…"}`       |
//!
//! Connection handling, QoS and retain flags belong to the publisher.

use log::warn;
use serde::Serialize;

use crate::app::events::{ShowerEvent, WallTimestamp};
use crate::app::ports::{EventSink, Publisher};

pub const TOPIC_SHOWER_ACTIVE: &str = "shower_active";
pub const TOPIC_SHOWER_DATA: &str = "shower_data";

#[derive(Serialize)]
struct ShowerData<'a> {
    duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a WallTimestamp>,
}

pub struct TopicSink<P> {
    publisher: P,
}

impl<P: Publisher> TopicSink<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

impl<P: Publisher> EventSink for TopicSink<P> {
    fn emit(&mut self, event: &ShowerEvent) {
        match event {
            ShowerEvent::StateChanged { active } => {
                // Always a string, never a JSON bool.
                let payload = if *active { "true" } else { "false" };
                self.publisher.publish(TOPIC_SHOWER_ACTIVE, payload);
            }
            ShowerEvent::SessionSummary {
                duration_seconds,
                timestamp,
            } => {
                let data = ShowerData {
                    duration: *duration_seconds,
                    timestamp: timestamp.as_ref(),
                };
                match serde_json::to_string(&data) {
                    Ok(payload) => self.publisher.publish(TOPIC_SHOWER_DATA, &payload),
                    Err(e) => warn!("shower_data serialization failed: {}", e),
                }
            }
        }
    }
}

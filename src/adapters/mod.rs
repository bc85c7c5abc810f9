//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                   |
//! |----------------|--------------------|-------------------------------|
//! | `gpio`         | TapSensorPort      | embedded-hal input pin        |
//! |                | ActuatorPort       | embedded-hal output pin/relay |
//! | `log_sink`     | EventSink          | Serial log output             |
//! | `nvs`          | ConfigPort         | ESP-IDF NVS flash / host sim  |
//! | `time`         | ClockPort          | ESP32 system timer / host     |
//! | `topic_sink`   | EventSink          | `Publisher` (MQTT-style)      |

pub mod gpio;
pub mod log_sink;
pub mod nvs;
pub mod time;
pub mod topic_sink;

//! Inbound commands to the shower monitor.
//!
//! These represent actions requested by the outside world (web UI, MQTT,
//! console) that the [`ShowerMonitor`](super::service::ShowerMonitor)
//! interprets.  Registration and dispatch of the command names belong to
//! the host application.

use serde::Serialize;

use crate::app::ports::ConfigError;
use crate::config::MonitorConfig;
use crate::error::RequestError;

use super::service::MonitorStatus;

#[derive(Debug, Clone)]
pub enum MonitorCommand {
    /// Cut the hot water now, if a shower is recognized.
    ColdShot,

    /// Republish the current shower state unconditionally.
    PublishState,

    /// Hot-reload configuration.
    UpdateConfig(MonitorConfig),

    /// Return a status snapshot.
    GetStatus,
}

/// Synchronous reply to a [`MonitorCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandReply {
    Ok,
    Status(MonitorStatus),
    Rejected { message: &'static str },
}

impl CommandReply {
    /// Human-readable message for the command surface.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Ok | Self::Status(_) => "OK",
            Self::Rejected { message } => message,
        }
    }

    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}

impl From<RequestError> for CommandReply {
    fn from(e: RequestError) -> Self {
        Self::Rejected {
            message: e.message(),
        }
    }
}

impl From<ConfigError> for CommandReply {
    fn from(e: ConfigError) -> Self {
        let message = match e {
            ConfigError::ValidationFailed(msg) => msg,
            ConfigError::Corrupted => "config corrupted",
            ConfigError::IoError => "config I/O error",
        };
        Self::Rejected { message }
    }
}

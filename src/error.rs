//! Error types for the shower monitor.
//!
//! The state machine itself never fails: it is arithmetic over unsigned
//! timestamps.  The only errors are rejected requests from the command
//! surface and configuration problems, both funnelled into [`Error`].

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An external request was not valid in the current state.
    InvalidRequest(RequestError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(e) => write!(f, "request: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Request errors
// ---------------------------------------------------------------------------

/// Rejections reported synchronously to the requester.  A rejected request
/// never mutates monitor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Cold shot requested while no shower is recognized.
    NotActive,
}

impl RequestError {
    /// Text returned to the command surface.
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotActive => "Coldshot failed. Shower not active",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotActive => write!(f, "not active"),
        }
    }
}

impl From<RequestError> for Error {
    fn from(e: RequestError) -> Self {
        Self::InvalidRequest(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#![forbid(unsafe_code)]

//! Errors surfaced at the edges of a pricing session.
//!
//! Engine operations themselves never fail. Only the inputs that cross into
//! the process can: configuration documents, unit lists, and the global
//! tracing subscriber.

use std::fmt;

use rentopt_runtime::ConfigError;

/// Top-level error type for rentopt hosts.
#[derive(Debug)]
pub enum Error {
    /// Engine configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// A unit list was not valid JSON or did not match the unit schema.
    Units(serde_json::Error),
    /// The tracing subscriber could not be installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Units(err) => write!(f, "unit list: {err}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Units(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Units(err)
    }
}

/// Standard result type for rentopt APIs.
pub type Result<T> = std::result::Result<T, Error>;

#![forbid(unsafe_code)]

//! Tracing subscriber installation for hosts.
//!
//! Library crates only emit through `tracing`; nothing is printed until a
//! host installs a subscriber. [`init`] installs a `fmt` subscriber whose
//! filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
//!
//! ```no_run
//! rentopt::logging::init(rentopt::logging::LogFormat::Json)?;
//! # Ok::<(), rentopt::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record, including the current span.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::Logging(format!("unknown log format {other:?}"))),
        }
    }
}

/// The filter [`init`] would install right now.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Fails with [`Error::Logging`] if a global subscriber is already set.
pub fn init(format: LogFormat) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
    };
    installed.map_err(|err| Error::Logging(err.to_string()))?;
    tracing::debug!(%format, "tracing subscriber installed");
    Ok(())
}

#![forbid(unsafe_code)]

//! Engine configuration as data.
//!
//! [`EngineConfig`] gathers the tunables of a pricing session. It can be
//! built in code or loaded from TOML or JSON at startup.
//!
//! ```toml
//! # rentopt.toml
//! debounce_ms = 250
//! quick_adjust_steps = [-25.0, -10.0, 10.0, 25.0]
//!
//! [history]
//! max_depth = 200
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::history::HistoryConfig;

/// Tunables for one pricing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quiescence window for single-field edits, in milliseconds.
    pub debounce_ms: u64,

    /// Snapshot retention.
    pub history: HistoryPolicyConfig,

    /// Quick-adjust deltas offered to the operator.
    pub quick_adjust_steps: Vec<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            history: HistoryPolicyConfig::default(),
            quick_adjust_steps: vec![-10.0, -5.0, 5.0, 10.0],
        }
    }
}

/// Snapshot retention parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPolicyConfig {
    /// Maximum retained snapshots; `0` (the default) keeps everything.
    /// Same meaning as [`HistoryConfig::max_depth`].
    pub max_depth: usize,
}

impl Default for HistoryPolicyConfig {
    fn default() -> Self {
        Self {
            max_depth: HistoryConfig::unlimited().max_depth,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check all parameters. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.debounce_ms == 0 {
            errors.push("debounce_ms must be greater than 0".to_owned());
        }
        if self.quick_adjust_steps.is_empty() {
            errors.push("quick_adjust_steps must not be empty".to_owned());
        }
        for step in &self.quick_adjust_steps {
            if !step.is_finite() || *step == 0.0 {
                errors.push(format!("quick_adjust_steps contains invalid step {step}"));
            }
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn to_history_config(&self) -> HistoryConfig {
        HistoryConfig::new(self.history.max_depth)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.debounce_window(), Duration::from_millis(300));
        assert_eq!(config.to_history_config(), HistoryConfig::default());
        assert_eq!(config.history.max_depth, 0);
        assert!(config.to_history_config().is_unlimited());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = EngineConfig::from_toml_str(
            r#"
            debounce_ms = 250
            quick_adjust_steps = [-25.0, 25.0]

            [history]
            max_depth = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.quick_adjust_steps, vec![-25.0, 25.0]);
        assert_eq!(config.to_history_config(), HistoryConfig::unlimited());
    }

    #[test]
    fn json_overrides() {
        let config = EngineConfig::from_json_str(r#"{"history": {"max_depth": 12}}"#).unwrap();
        assert_eq!(config.to_history_config().max_depth, 12);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn validation_rejects_zero_debounce_and_bad_steps() {
        let err = EngineConfig::from_json_str(r#"{"debounce_ms": 0, "quick_adjust_steps": [0.0]}"#)
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("debounce_ms"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn malformed_input_reports_parser() {
        let err = EngineConfig::from_toml_str("debounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
        assert!(std::error::Error::source(&err).is_some());

        let err = EngineConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn loads_from_files() {
        let mut toml_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(toml_file, "debounce_ms = 120").unwrap();
        let config = EngineConfig::from_toml_file(toml_file.path()).unwrap();
        assert_eq!(config.debounce_ms, 120);

        let mut json_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(json_file, r#"{{"debounce_ms": 80}}"#).unwrap();
        let config = EngineConfig::from_json_file(json_file.path()).unwrap();
        assert_eq!(config.debounce_ms, 80);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

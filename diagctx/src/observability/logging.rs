//! Subscriber setup for binaries and tests using this crate.

use crate::errors::MdcError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives, in `RUST_LOG` syntax.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Whether to emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
    /// Whether `RUST_LOG` overrides `filter` when set.
    #[serde(default = "default_respect_env")]
    pub respect_env: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_respect_env() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            respect_env: default_respect_env(),
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Enables or disables JSON output.
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Builds the env filter for this configuration.
    ///
    /// # Errors
    ///
    /// Returns `MdcError::Config` if the directives do not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, MdcError> {
        if self.respect_env {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return Ok(filter);
            }
        }
        EnvFilter::try_new(&self.filter).map_err(|e| MdcError::config(e.to_string()))
    }
}

/// Installs a global `tracing` subscriber.
///
/// # Errors
///
/// Returns `MdcError::Config` if the filter is invalid or a global subscriber
/// is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), MdcError> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| MdcError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::new();
        assert_eq!(config.filter, "info");
        assert!(!config.json);
        assert!(config.respect_env);
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config: LoggingConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(config.json);
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        let config = LoggingConfig {
            filter: "diagctx=notalevel".to_string(),
            json: false,
            respect_env: false,
        };
        assert!(matches!(config.env_filter(), Err(MdcError::Config(_))));
    }

    #[test]
    fn test_valid_filter() {
        let config = LoggingConfig::new()
            .with_filter("diagctx=trace")
            .with_json(false);
        let config = LoggingConfig {
            respect_env: false,
            ..config
        };
        assert!(config.env_filter().is_ok());
    }
}

//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error - required field missing or empty
    #[error("{collector} collector is missing required field '{field}'")]
    MissingField {
        /// Collector profile name
        collector: &'static str,
        /// Missing field name
        field: &'static str,
    },

    /// No collector profile configured
    #[error("no collectors are configured - at least one of [collectd] or [graphite] is required")]
    NoCollectorsEnabled,
}

impl ConfigError {
    /// Create a MissingField error
    pub fn missing_field(collector: &'static str, field: &'static str) -> Self {
        Self::MissingField { collector, field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_error() {
        let err = ConfigError::missing_field("graphite", "api_key");
        assert!(err.to_string().contains("graphite"));
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_no_collectors_error() {
        let err = ConfigError::NoCollectorsEnabled;
        assert!(err.to_string().contains("no collectors"));
    }
}

//! Statbridge Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use statbridge_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[collectd]\npath = \"/run/collectd.sock\"").unwrap();
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [collectd]
//! path = "/run/collectd-unixsock"
//! ```
//!
//! A collector section being present enables that profile; at least one
//! profile must be configured.

mod collectd;
mod error;
mod graphite;
mod logging;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use collectd::CollectdConfig;
pub use error::{ConfigError, Result};
pub use graphite::GraphiteConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults, except that at least
/// one collector profile must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// collectd unixsock collector (Profile A)
    pub collectd: Option<CollectdConfig>,

    /// graphite plaintext collector (Profile B)
    pub graphite: Option<GraphiteConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks that at least one collector is configured and that required
    /// fields are non-empty.
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Names of the configured collector profiles
    pub fn enabled_collectors(&self) -> Vec<&'static str> {
        let mut collectors = Vec::new();
        if self.collectd.is_some() {
            collectors.push("collectd");
        }
        if self.graphite.is_some() {
            collectors.push("graphite");
        }
        collectors
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn test_minimal_collectd_config() {
        let config = Config::from_str("[collectd]\npath = \"/run/cd.sock\"").unwrap();
        let collectd = config.collectd.unwrap();
        assert_eq!(collectd.path.to_str().unwrap(), "/run/cd.sock");
        assert_eq!(collectd.refresh_interval, Duration::from_secs(10));
        assert!(config.graphite.is_none());
    }

    #[test]
    fn test_minimal_graphite_config() {
        let toml = r#"
[graphite]
host = "carbon.example.com"
api_key = "key1"
"#;
        let config = Config::from_str(toml).unwrap();
        let graphite = config.graphite.unwrap();
        assert_eq!(graphite.host, "carbon.example.com");
        assert_eq!(graphite.port, 2003);
    }

    #[test]
    fn test_both_profiles() {
        let toml = r#"
[log]
level = "debug"

[collectd]
path = "/run/cd.sock"
refresh_interval = "2s"

[graphite]
host = "carbon"
api_key = "key1"
prefix = "prod"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.enabled_collectors(), vec!["collectd", "graphite"]);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(
            config.collectd.unwrap().refresh_interval,
            Duration::from_secs(2)
        );
        assert_eq!(config.graphite.unwrap().prefix.as_deref(), Some("prod"));
    }

    #[test]
    fn test_no_collector_rejected() {
        let result = Config::from_str("");
        assert!(matches!(result, Err(ConfigError::NoCollectorsEnabled)));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}

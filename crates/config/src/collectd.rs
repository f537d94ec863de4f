//! collectd collector configuration (Profile A)
//!
//! The collectd unixsock plugin accepts `PUTVAL` lines over a local
//! stream socket and answers each one with a status line.
//!
//! # Example
//!
//! ```toml
//! [collectd]
//! path = "/run/collectd-unixsock"
//! hostname = "web01"
//! plugin_instance = "node1"
//! refresh_interval = "10s"
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// collectd collector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectdConfig {
    /// Filesystem path of the unixsock socket
    /// Required
    pub path: PathBuf,

    /// Hostname used in the PUTVAL identifier
    /// Default: "localhost"
    pub hostname: Option<String>,

    /// Plugin name (first identifier segment)
    /// Default: "exometer"
    pub plugin_name: String,

    /// Plugin instance (second identifier segment)
    /// Default: short form of the hostname
    pub plugin_instance: Option<String>,

    /// collectd type for reported values
    /// Default: "gauge" (the only type currently emitted)
    pub type_spec: Option<String>,

    /// Connect timeout
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Timeout for reading the reply to a PUTVAL
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub read_timeout: Duration,

    /// How long a value stays fresh before it is re-emitted
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,

    /// Wait time between reconnect attempts
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub reconnect_interval: Duration,
}

impl Default for CollectdConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            hostname: None,
            plugin_name: "exometer".to_string(),
            plugin_instance: None,
            type_spec: None,
            connect_timeout: Duration::from_millis(5000),
            read_timeout: Duration::from_millis(5000),
            refresh_interval: Duration::from_secs(10),
            reconnect_interval: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectdConfig::default();
        assert_eq!(config.plugin_name, "exometer");
        assert!(config.hostname.is_none());
        assert!(config.type_spec.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
        assert_eq!(config.reconnect_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: CollectdConfig = toml::from_str("path = \"/run/cd.sock\"").unwrap();
        assert_eq!(config.path.to_str().unwrap(), "/run/cd.sock");
        assert_eq!(config.plugin_name, "exometer");
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
path = "/run/cd.sock"
hostname = "web01"
plugin_name = "bridge"
plugin_instance = "a"
type_spec = "gauge"
connect_timeout = "1s"
read_timeout = "250ms"
refresh_interval = "2s"
reconnect_interval = "5s"
"#;
        let config: CollectdConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.hostname.as_deref(), Some("web01"));
        assert_eq!(config.plugin_name, "bridge");
        assert_eq!(config.plugin_instance.as_deref(), Some("a"));
        assert_eq!(config.read_timeout, Duration::from_millis(250));
        assert_eq!(config.reconnect_interval, Duration::from_secs(5));
    }
}

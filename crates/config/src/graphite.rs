//! graphite collector configuration (Profile B)
//!
//! The graphite plaintext protocol is fire-and-forget TCP: one metric
//! line per value, no replies.
//!
//! # Example
//!
//! ```toml
//! [graphite]
//! host = "carbon.example.com"
//! port = 2003
//! api_key = "key1"
//! prefix = "prod"
//! ```

use serde::Deserialize;
use std::time::Duration;

/// graphite collector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphiteConfig {
    /// Collector host
    /// Required
    pub host: String,

    /// Collector port
    /// Default: 2003 (carbon plaintext)
    pub port: u16,

    /// Top-level namespace for every metric path
    /// Required
    pub api_key: String,

    /// Optional sub-namespace between the api key and the metric path
    pub prefix: Option<String>,

    /// Opaque passthrough tag; not interpreted by the bridge
    pub mode: Option<String>,

    /// Connect timeout
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// How long a value stays fresh before it is re-emitted
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,

    /// Wait time between reconnect attempts
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub reconnect_interval: Duration,

    /// TCP keep-alive enabled
    /// Default: true
    pub tcp_keepalive: bool,

    /// TCP keep-alive probe interval
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub tcp_keepalive_interval: Duration,
}

impl Default for GraphiteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 2003,
            api_key: String::new(),
            prefix: None,
            mode: None,
            connect_timeout: Duration::from_millis(5000),
            refresh_interval: Duration::from_secs(10),
            reconnect_interval: Duration::from_secs(30),
            tcp_keepalive: true,
            tcp_keepalive_interval: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphiteConfig::default();
        assert_eq!(config.port, 2003);
        assert!(config.prefix.is_none());
        assert!(config.mode.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
        assert_eq!(config.reconnect_interval, Duration::from_secs(30));
        assert!(config.tcp_keepalive);
    }

    #[test]
    fn test_deserialize_minimal() {
        let toml = r#"
host = "carbon"
api_key = "key1"
"#;
        let config: GraphiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.host, "carbon");
        assert_eq!(config.api_key, "key1");
        assert_eq!(config.port, 2003);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
host = "carbon"
port = 2004
api_key = "key1"
prefix = "prod"
mode = "aggregate"
connect_timeout = "1s"
refresh_interval = "500ms"
reconnect_interval = "2s"
tcp_keepalive = false
"#;
        let config: GraphiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.port, 2004);
        assert_eq!(config.prefix.as_deref(), Some("prod"));
        assert_eq!(config.mode.as_deref(), Some("aggregate"));
        assert_eq!(config.refresh_interval, Duration::from_millis(500));
        assert!(!config.tcp_keepalive);
    }
}

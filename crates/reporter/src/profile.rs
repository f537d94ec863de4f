//! Collector profiles
//!
//! Exactly two wire profiles exist; there is no pluggable protocol
//! abstraction. A profile owns everything the reporter needs
//! to talk to its collector: the target address, the line encoding, the
//! reply expectation, and the timing knobs.

use std::time::Duration;

use statbridge_config::{CollectdConfig, GraphiteConfig};
use statbridge_protocol::{CollectdContext, MetricKey, Value, collectd_line, graphite_line};

use crate::connection::{ConnectOptions, Target};

/// The collectd type emitted for every value. Mapping datapoints to
/// richer collectd types is not supported.
const COLLECTD_TYPE: &str = "gauge";

/// collectd profile state (Profile A: unixsock, replies)
#[derive(Debug, Clone)]
pub struct CollectdProfile {
    ctx: CollectdContext,
    target: Target,
    connect_timeout: Duration,
    read_timeout: Duration,
    refresh_interval: Duration,
    reconnect_interval: Duration,
}

/// graphite profile state (Profile B: TCP, fire-and-forget)
#[derive(Debug, Clone)]
pub struct GraphiteProfile {
    api_key: String,
    prefix: Option<String>,
    target: Target,
    connect_timeout: Duration,
    refresh_interval: Duration,
    reconnect_interval: Duration,
    tcp_keepalive: Option<Duration>,
}

/// One collector wire profile
#[derive(Debug, Clone)]
pub enum Profile {
    /// collectd unixsock
    Collectd(CollectdProfile),
    /// graphite plaintext TCP
    Graphite(GraphiteProfile),
}

impl Profile {
    /// Build the collectd profile from its config section.
    ///
    /// The hostname defaults to `localhost`; the plugin instance defaults
    /// to the short form of the hostname.
    pub fn collectd(config: CollectdConfig) -> Self {
        let host = config.hostname.unwrap_or_else(|| "localhost".to_string());
        let instance = config
            .plugin_instance
            .unwrap_or_else(|| short_name(&host).to_string());

        Self::Collectd(CollectdProfile {
            ctx: CollectdContext {
                host,
                plugin: config.plugin_name,
                instance,
                // type_spec is accepted in config but every value is
                // currently emitted as a gauge
                type_name: COLLECTD_TYPE.to_string(),
            },
            target: Target::Unix { path: config.path },
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
            refresh_interval: config.refresh_interval,
            reconnect_interval: config.reconnect_interval,
        })
    }

    /// Build the graphite profile from its config section.
    ///
    /// `mode` is an opaque passthrough and does not affect reporting.
    pub fn graphite(config: GraphiteConfig) -> Self {
        Self::Graphite(GraphiteProfile {
            api_key: config.api_key,
            prefix: config.prefix,
            target: Target::Tcp {
                host: config.host,
                port: config.port,
            },
            connect_timeout: config.connect_timeout,
            refresh_interval: config.refresh_interval,
            reconnect_interval: config.reconnect_interval,
            tcp_keepalive: config
                .tcp_keepalive
                .then_some(config.tcp_keepalive_interval),
        })
    }

    /// Profile name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Collectd(_) => "collectd",
            Self::Graphite(_) => "graphite",
        }
    }

    pub(crate) fn target(&self) -> &Target {
        match self {
            Self::Collectd(p) => &p.target,
            Self::Graphite(p) => &p.target,
        }
    }

    pub(crate) fn connect_options(&self) -> ConnectOptions {
        match self {
            Self::Collectd(p) => ConnectOptions {
                timeout: p.connect_timeout,
                tcp_keepalive: None,
            },
            Self::Graphite(p) => ConnectOptions {
                timeout: p.connect_timeout,
                tcp_keepalive: p.tcp_keepalive,
            },
        }
    }

    /// Whether the collector answers every line with a status reply
    pub(crate) fn expects_reply(&self) -> bool {
        matches!(self, Self::Collectd(_))
    }

    pub(crate) fn read_timeout(&self) -> Duration {
        match self {
            Self::Collectd(p) => p.read_timeout,
            // graphite never replies; the value is unused
            Self::Graphite(_) => Duration::ZERO,
        }
    }

    pub(crate) fn refresh_interval(&self) -> Duration {
        match self {
            Self::Collectd(p) => p.refresh_interval,
            Self::Graphite(p) => p.refresh_interval,
        }
    }

    pub(crate) fn reconnect_interval(&self) -> Duration {
        match self {
            Self::Collectd(p) => p.reconnect_interval,
            Self::Graphite(p) => p.reconnect_interval,
        }
    }

    /// Build the wire line for one value
    pub(crate) fn encode(&self, key: &MetricKey, value: Value, timestamp: u64) -> String {
        match self {
            Self::Collectd(p) => collectd_line(&p.ctx, key, value, timestamp),
            Self::Graphite(p) => {
                graphite_line(&p.api_key, p.prefix.as_deref(), key, value, timestamp)
            }
        }
    }
}

/// Short form of a hostname: everything before the first dot
fn short_name(host: &str) -> &str {
    host.split('.').next().unwrap_or(host)
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

//! Wire-line builders
//!
//! Each collector speaks a fixed line-oriented text format:
//!
//! ```text
//! PUTVAL <host>/<plugin>-<instance>/<type>-<name> <timestamp>:<value>\n
//! ```
//!
//! for the collectd unixsock protocol, and
//!
//! ```text
//! <api_key>[.<prefix>].<path>.<datapoint> <value> <timestamp>\n
//! ```
//!
//! for the graphite plaintext protocol. Timestamps are decimal seconds
//! since the Unix epoch; callers supply them.

use crate::{COLLECTD_KEY_SEPARATOR, GRAPHITE_KEY_SEPARATOR, MetricKey, Value};

/// Host context for collectd lines.
///
/// Identifies where a value originated: `<host>/<plugin>-<instance>`.
/// The type currently always resolves to the literal `"gauge"` at the
/// call sites; it is carried here so the line builder stays pure.
#[derive(Debug, Clone)]
pub struct CollectdContext {
    /// Reporting hostname
    pub host: String,
    /// Plugin name (first identifier segment)
    pub plugin: String,
    /// Plugin instance (second identifier segment)
    pub instance: String,
    /// collectd type (resolves to `"gauge"`)
    pub type_name: String,
}

/// Build a collectd `PUTVAL` line, newline-terminated.
pub fn collectd_line(
    ctx: &CollectdContext,
    key: &MetricKey,
    value: Value,
    timestamp: u64,
) -> String {
    format!(
        "PUTVAL {}/{}-{}/{}-{} {}:{}\n",
        ctx.host,
        ctx.plugin,
        ctx.instance,
        ctx.type_name,
        key.flatten(COLLECTD_KEY_SEPARATOR),
        timestamp,
        value.render(),
    )
}

/// Build a graphite plaintext line, newline-terminated.
///
/// The prefix segment is omitted when `prefix` is `None` or empty.
pub fn graphite_line(
    api_key: &str,
    prefix: Option<&str>,
    key: &MetricKey,
    value: Value,
    timestamp: u64,
) -> String {
    let path = key.flatten(GRAPHITE_KEY_SEPARATOR);
    match prefix {
        Some(prefix) if !prefix.is_empty() => {
            format!("{api_key}.{prefix}.{path} {} {timestamp}\n", value.render())
        }
        _ => format!("{api_key}.{path} {} {timestamp}\n", value.render()),
    }
}

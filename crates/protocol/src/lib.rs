//! Statbridge - Protocol
//!
//! Pure codec types for the two line-oriented collector protocols:
//!
//! - `MetricKey` - structured metric identity (path segments + datapoint)
//! - `Value` - numeric payload with protocol-defined rendering
//! - `collectd_line` / `graphite_line` - exact wire-line builders
//! - `parse_reply` - collectd status-line parser
//!
//! # Design Principles
//!
//! - **Pure**: no I/O, no clocks, no state. Callers supply timestamps.
//! - **No error cases on encode**: malformed values degrade to the
//!   protocol default (`"0"`) rather than failing.
//! - **Fail closed on decode**: a reply that does not match
//!   `<int status><space><message>\n` is a `ProtocolError`.

mod error;
mod key;
mod line;
mod reply;
mod value;

pub use error::ProtocolError;
pub use key::{MetricKey, Segment};
pub use line::{CollectdContext, collectd_line, graphite_line};
pub use reply::{Reply, parse_reply};
pub use value::Value;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Separator used when flattening a key for the collectd name part
pub const COLLECTD_KEY_SEPARATOR: char = '_';

/// Separator used when flattening a key for the graphite path
pub const GRAPHITE_KEY_SEPARATOR: char = '.';

// Test modules - only compiled during testing
#[cfg(test)]
mod key_test;
#[cfg(test)]
mod line_test;
#[cfg(test)]
mod reply_test;

//! Statbridge - Reporter
//!
//! The reporting/refresh engine: maintains one outbound connection per
//! collector, translates metric updates into protocol lines, reconnects
//! with a fixed backoff on failure, and re-emits the last known value for
//! every subscribed metric on a heartbeat cadence.
//!
//! # Architecture
//!
//! ```text
//! [ReporterHandle] --mpsc--> [Reporter task] --line--> [Collector]
//!                                 ^    |
//!                                 |    v
//!                            refresh / reconnect timers
//! ```
//!
//! A single tokio task exclusively owns the connection state and the
//! per-key timer table; every report, refresh fire, unsubscribe, and
//! reconnect attempt is serialized through its mailbox. Timers are
//! delayed self-sends into the same mailbox, so no two handlers ever run
//! concurrently against the shared state.
//!
//! # Delivery semantics
//!
//! Reporting is best-effort, at-most-once. Values reported while the
//! collector is unreachable are dropped (and counted), not buffered; the
//! next successful report for a key resumes its heartbeat.

mod connection;
mod counters;
mod error;
mod profile;
mod refresh;
mod reporter;

pub use connection::{Connection, ConnectOptions, Target};
pub use counters::{CountersSnapshot, ReporterCounters};
pub use error::ReportError;
pub use profile::Profile;
pub use reporter::{Reporter, ReporterHandle};

use tokio_util::sync::CancellationToken;

/// Spawn a reporter for `profile` as a background task.
///
/// Returns the handle for feeding it. The task runs until `cancel` fires
/// or the last handle is dropped.
pub fn spawn(profile: Profile, cancel: CancellationToken) -> ReporterHandle {
    let (reporter, handle) = Reporter::new(profile);
    tokio::spawn(reporter.run(cancel));
    handle
}

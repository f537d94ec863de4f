//! Report pipeline
//!
//! The reporter is a single task that owns the collector connection and
//! the refresh-timer table. Every report, subscribe/unsubscribe, refresh
//! fire, and reconnect attempt arrives through its mailbox and is handled
//! sequentially, which is what guarantees the one-timer-per-key and
//! one-pending-reconnect invariants.
//!
//! # Reply handling (collectd)
//!
//! The collector answers every `PUTVAL` with `<status> <message>`:
//!
//! - `0` - value accepted, refresh armed
//! - negative - rejected; logged as an error, no refresh armed
//! - anything else - not interpreted; the value counts as delivered but
//!   no refresh is armed
//!
//! A malformed reply leaves the stream unsynchronized, so it is treated
//! like a transport failure: disconnect and schedule a reconnect.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use statbridge_protocol::{MetricKey, Value, parse_reply};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::connection::Connection;
use crate::counters::{CountersSnapshot, ReporterCounters};
use crate::error::ReportError;
use crate::profile::Profile;
use crate::refresh::RefreshTimers;

/// Mailbox capacity; reports are tiny and handled quickly
const CHANNEL_BUFFER: usize = 64;

/// Events serialized through the reporter mailbox
#[derive(Debug)]
pub(crate) enum Event {
    /// New value from the subscription layer
    Report { key: MetricKey, value: Value },
    /// Subscription announcement; accepted for symmetry, no-op
    Subscribe { key: MetricKey },
    /// Stop refreshing a key
    Unsubscribe { key: MetricKey },
    /// A refresh timer fired
    RefreshDue {
        key: MetricKey,
        value: Value,
        generation: u64,
    },
    /// The reconnect timer fired
    ReconnectDue,
}

/// Connection state owned by the reporter
enum ConnectionState {
    Disconnected,
    Connected(Connection),
}

/// Outcome of one transmission attempt over a live connection
enum Outcome {
    /// Delivered; arm a refresh
    Refreshing,
    /// Delivered; do not arm a refresh
    Accepted,
    /// Collector rejected the value (connection stays up)
    Rejected(ReportError),
    /// Transport-level failure; connection must be torn down
    TransportFailed(ReportError),
}

/// Handle for feeding a reporter.
///
/// Cheap to clone; all clones feed the same mailbox. Dropping every
/// handle shuts the reporter down after it drains pending events.
#[derive(Clone)]
pub struct ReporterHandle {
    tx: mpsc::Sender<Event>,
    counters: Arc<ReporterCounters>,
}

impl ReporterHandle {
    /// Report a new value for `key`.
    ///
    /// Best-effort: delivery failures are handled inside the reporter
    /// and never surface here. Errors only when the reporter is gone.
    pub async fn report(&self, key: MetricKey, value: Value) -> Result<(), ReportError> {
        self.send(Event::Report { key, value }).await
    }

    /// Announce interest in `key`. Currently a no-op, accepted for
    /// symmetry with `unsubscribe`.
    pub async fn subscribe(&self, key: MetricKey) -> Result<(), ReportError> {
        self.send(Event::Subscribe { key }).await
    }

    /// Stop the refresh heartbeat for `key`.
    pub async fn unsubscribe(&self, key: MetricKey) -> Result<(), ReportError> {
        self.send(Event::Unsubscribe { key }).await
    }

    /// Snapshot of the reporter's counters
    pub fn counters(&self) -> CountersSnapshot {
        self.counters.snapshot()
    }

    async fn send(&self, event: Event) -> Result<(), ReportError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| ReportError::ChannelClosed)
    }
}

/// The reporting/refresh engine for one collector
pub struct Reporter {
    profile: Profile,
    state: ConnectionState,
    timers: RefreshTimers,
    reconnect_pending: bool,
    counters: Arc<ReporterCounters>,
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl Reporter {
    /// Create a reporter and its handle.
    ///
    /// The reporter must be driven by spawning `run()`.
    pub fn new(profile: Profile) -> (Self, ReporterHandle) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let counters = Arc::new(ReporterCounters::new());

        let handle = ReporterHandle {
            tx: tx.clone(),
            counters: Arc::clone(&counters),
        };

        let reporter = Self {
            profile,
            state: ConnectionState::Disconnected,
            timers: RefreshTimers::new(),
            reconnect_pending: false,
            counters,
            tx,
            rx,
        };

        (reporter, handle)
    }

    /// Run the reporter until `cancel` fires or all handles are dropped.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            collector = self.profile.name(),
            target = %self.profile.target(),
            "reporter starting"
        );

        self.try_connect().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(collector = self.profile.name(), "reporter canceled");
                    break;
                }
                event = self.rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event).await,
                        None => break,
                    }
                }
            }
        }

        let snapshot = self.counters.snapshot();
        info!(
            collector = self.profile.name(),
            values_sent = snapshot.values_sent,
            refreshes_sent = snapshot.refreshes_sent,
            values_dropped = snapshot.values_dropped,
            values_rejected = snapshot.values_rejected,
            send_errors = snapshot.send_errors,
            connects = snapshot.connects,
            "reporter shutting down"
        );
    }

    async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Report { key, value } => {
                self.handle_report(key, value, false).await;
            }
            Event::Subscribe { key } => {
                trace!(%key, "subscribed");
            }
            Event::Unsubscribe { key } => {
                if self.timers.cancel(&key) {
                    trace!(%key, "unsubscribed, refresh canceled");
                }
            }
            Event::RefreshDue {
                key,
                value,
                generation,
            } => {
                if !self.timers.is_current(&key, generation) {
                    // Raced with an unsubscribe or a newer report
                    trace!(%key, "stale refresh discarded");
                    return;
                }
                self.handle_report(key, value, true).await;
            }
            Event::ReconnectDue => {
                self.reconnect_pending = false;
                if matches!(self.state, ConnectionState::Connected(_)) {
                    return;
                }
                self.try_connect().await;
            }
        }
    }

    /// Transmit one value and manage the key's refresh timer.
    ///
    /// Every report or refresh supersedes the previous timer for its key
    /// before anything is sent; only a refreshing success arms a new one.
    async fn handle_report(&mut self, key: MetricKey, value: Value, is_refresh: bool) {
        self.timers.cancel(&key);

        let ConnectionState::Connected(conn) = &mut self.state else {
            debug!(%key, "value dropped while disconnected");
            self.counters.value_dropped();
            return;
        };

        let line = self.profile.encode(&key, value, unix_timestamp());
        match transmit(&self.profile, conn, &line).await {
            Outcome::Refreshing => {
                if is_refresh {
                    self.counters.refresh_sent();
                } else {
                    self.counters.value_sent();
                }
                self.timers.arm(
                    key,
                    value,
                    self.profile.refresh_interval(),
                    self.tx.clone(),
                );
            }
            Outcome::Accepted => {
                self.counters.value_sent();
            }
            Outcome::Rejected(err) => {
                error!(%key, error = %err, "collector rejected value");
                self.counters.value_rejected();
            }
            Outcome::TransportFailed(err) => {
                warn!(%key, error = %err, "value dropped, connection failed");
                self.counters.value_dropped();
                self.counters.send_error();
                self.disconnect();
            }
        }
    }

    async fn try_connect(&mut self) {
        match Connection::connect(self.profile.target(), &self.profile.connect_options()).await {
            Ok(conn) => {
                info!(
                    collector = self.profile.name(),
                    target = %self.profile.target(),
                    "connected to collector"
                );
                self.counters.connect();
                self.state = ConnectionState::Connected(conn);
            }
            Err(err) => {
                warn!(
                    collector = self.profile.name(),
                    target = %self.profile.target(),
                    error = %err,
                    "connect failed, will retry"
                );
                self.schedule_reconnect();
            }
        }
    }

    fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.schedule_reconnect();
    }

    /// Arm the reconnect timer unless one is already outstanding.
    ///
    /// Fixed interval, no cap, no jitter.
    fn schedule_reconnect(&mut self) {
        if self.reconnect_pending {
            return;
        }
        self.reconnect_pending = true;

        let tx = self.tx.clone();
        let delay = self.profile.reconnect_interval();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Event::ReconnectDue).await;
        });
    }
}

/// Send one line and classify the result.
///
/// Free function so the connection borrow does not alias the reporter.
async fn transmit(profile: &Profile, conn: &mut Connection, line: &str) -> Outcome {
    if let Err(err) = conn.send_line(line).await {
        return Outcome::TransportFailed(err);
    }

    if !profile.expects_reply() {
        return Outcome::Refreshing;
    }

    let reply_line = match conn.read_reply(profile.read_timeout()).await {
        Ok(line) => line,
        Err(err) => return Outcome::TransportFailed(err),
    };

    match parse_reply(&reply_line) {
        Ok(reply) if reply.is_ok() => Outcome::Refreshing,
        Ok(reply) if reply.is_error() => Outcome::Rejected(ReportError::ReplyRejected {
            status: reply.status,
            message: reply.message,
        }),
        Ok(reply) => {
            let err = ReportError::ReplyUnsupported {
                status: reply.status,
                message: reply.message,
            };
            info!("{err}");
            Outcome::Accepted
        }
        // Framing is lost; the connection cannot be trusted anymore
        Err(err) => Outcome::TransportFailed(ReportError::Protocol(err)),
    }
}

/// Seconds since the Unix epoch, from the system clock
fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
#[path = "reporter_test.rs"]
mod reporter_test;

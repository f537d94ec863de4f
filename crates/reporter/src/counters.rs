//! Reporter counters
//!
//! Cheap atomic counters shared between the reporter task and its
//! handles. Logged as a summary on shutdown.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a reporter
#[derive(Debug, Default)]
pub struct ReporterCounters {
    /// Values transmitted from direct reports
    pub values_sent: AtomicU64,

    /// Values re-emitted by the refresh heartbeat
    pub refreshes_sent: AtomicU64,

    /// Values dropped (disconnected or transport failure mid-report)
    pub values_dropped: AtomicU64,

    /// Values the collector answered with a negative status
    pub values_rejected: AtomicU64,

    /// Transport failures observed on send/receive
    pub send_errors: AtomicU64,

    /// Successful connects (initial connect included)
    pub connects: AtomicU64,
}

impl ReporterCounters {
    /// Create new counters
    pub const fn new() -> Self {
        Self {
            values_sent: AtomicU64::new(0),
            refreshes_sent: AtomicU64::new(0),
            values_dropped: AtomicU64::new(0),
            values_rejected: AtomicU64::new(0),
            send_errors: AtomicU64::new(0),
            connects: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn value_sent(&self) {
        self.values_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn refresh_sent(&self) {
        self.refreshes_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn value_dropped(&self) {
        self.values_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn value_rejected(&self) {
        self.values_rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn send_error(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn connect(&self) {
        self.connects.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            values_sent: self.values_sent.load(Ordering::Relaxed),
            refreshes_sent: self.refreshes_sent.load(Ordering::Relaxed),
            values_dropped: self.values_dropped.load(Ordering::Relaxed),
            values_rejected: self.values_rejected.load(Ordering::Relaxed),
            send_errors: self.send_errors.load(Ordering::Relaxed),
            connects: self.connects.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of reporter counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub values_sent: u64,
    pub refreshes_sent: u64,
    pub values_dropped: u64,
    pub values_rejected: u64,
    pub send_errors: u64,
    pub connects: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_increments() {
        let counters = ReporterCounters::new();
        counters.value_sent();
        counters.value_sent();
        counters.refresh_sent();
        counters.value_dropped();
        counters.connect();

        let snap = counters.snapshot();
        assert_eq!(snap.values_sent, 2);
        assert_eq!(snap.refreshes_sent, 1);
        assert_eq!(snap.values_dropped, 1);
        assert_eq!(snap.values_rejected, 0);
        assert_eq!(snap.connects, 1);
    }
}

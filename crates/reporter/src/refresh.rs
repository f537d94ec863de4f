//! Per-key refresh timers
//!
//! One outstanding timer per metric key, at most. Arming a key that
//! already holds a timer cancels the old one first; a timer that fires
//! after it was superseded or canceled identifies itself by generation
//! and is discarded by the reporter.
//!
//! Timers are delayed self-sends: each one is a task that sleeps for the
//! refresh interval and then posts `Event::RefreshDue` into the reporter
//! mailbox. Only the reporter task mutates this table, so cancel-then-arm
//! is atomic with respect to every other key event.

use std::collections::HashMap;
use std::time::Duration;

use statbridge_protocol::{MetricKey, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::reporter::Event;

/// Binding of a key to its one outstanding timer
struct TimerEntry {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Timer registry, exclusively owned by one reporter
pub(crate) struct RefreshTimers {
    entries: HashMap<MetricKey, TimerEntry>,
    next_generation: u64,
}

impl RefreshTimers {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Arm a refresh for `key`, canceling any previous timer for it.
    ///
    /// After `delay`, `Event::RefreshDue` carrying `value` and the new
    /// generation is posted to `tx`.
    pub(crate) fn arm(
        &mut self,
        key: MetricKey,
        value: Value,
        delay: Duration,
        tx: mpsc::Sender<Event>,
    ) {
        self.next_generation += 1;
        let generation = self.next_generation;

        let timer_key = key.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx
                .send(Event::RefreshDue {
                    key: timer_key,
                    value,
                    generation,
                })
                .await;
        });

        if let Some(old) = self.entries.insert(key, TimerEntry { generation, handle }) {
            old.handle.abort();
        }
    }

    /// Cancel the timer for `key` if one exists.
    ///
    /// Idempotent: canceling an already-fired or already-canceled timer
    /// is a no-op. Returns whether an entry was removed.
    pub(crate) fn cancel(&mut self, key: &MetricKey) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a fired timer is still the live one for its key.
    ///
    /// False when the key was unsubscribed or a newer report re-armed it
    /// while the fire was in flight.
    pub(crate) fn is_current(&self, key: &MetricKey, generation: u64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.generation == generation)
    }

    /// Number of keys holding a pending timer
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Drop for RefreshTimers {
    fn drop(&mut self) {
        for entry in self.entries.values() {
            entry.handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

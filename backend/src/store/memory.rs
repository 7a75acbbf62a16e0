//! In-memory store
//!
//! Backs both adapter traits with mutex-guarded vectors. Timestamps are
//! assigned under the command-log lock, so the vector is always sorted by
//! timestamp and `latest` is the last element.
//!
//! The unavailability toggles simulate a store outage; they are compiled
//! into normal builds so integration tests (and demos) can exercise the
//! transient-failure paths of every polling loop.

use crate::core::clock::LogClock;
use crate::models::command::CommandRecord;
use crate::models::snapshot::TelemetrySnapshot;
use crate::store::{CommandLog, StoreError, TelemetrySink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Shared in-memory command log + telemetry sink.
///
/// # Example
/// ```
/// use motor_sim_core_rs::{CommandLog, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.append("ClientA", 25).unwrap();
/// let latest = store.latest().unwrap().unwrap();
/// assert_eq!(latest.issuer(), "ClientA");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    clock: LogClock,
    commands: Mutex<Vec<CommandRecord>>,
    telemetry: Mutex<Vec<TelemetrySnapshot>>,
    commands_unavailable: AtomicBool,
    telemetry_unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a command-log outage (both append and latest fail).
    pub fn set_commands_unavailable(&self, unavailable: bool) {
        self.commands_unavailable
            .store(unavailable, Ordering::SeqCst);
    }

    /// Simulate a telemetry-sink outage.
    pub fn set_telemetry_unavailable(&self, unavailable: bool) {
        self.telemetry_unavailable
            .store(unavailable, Ordering::SeqCst);
    }

    /// Number of command records appended so far.
    pub fn command_count(&self) -> usize {
        self.commands.lock().expect("command log mutex poisoned").len()
    }

    /// Copy of every command record, in timestamp order.
    pub fn commands(&self) -> Vec<CommandRecord> {
        self.commands
            .lock()
            .expect("command log mutex poisoned")
            .clone()
    }

    /// Number of telemetry rows appended so far.
    pub fn telemetry_count(&self) -> usize {
        self.telemetry
            .lock()
            .expect("telemetry mutex poisoned")
            .len()
    }

    /// Copy of every telemetry row, in append order.
    pub fn telemetry_rows(&self) -> Vec<TelemetrySnapshot> {
        self.telemetry
            .lock()
            .expect("telemetry mutex poisoned")
            .clone()
    }
}

impl CommandLog for MemoryStore {
    fn append(&self, issuer: &str, percent_change: i64) -> Result<CommandRecord, StoreError> {
        if self.commands_unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "command log offline".to_string(),
            });
        }

        let mut rows = self.commands.lock().expect("command log mutex poisoned");
        // Timestamp taken under the lock keeps the vector timestamp-sorted.
        let record =
            CommandRecord::new(issuer.to_string(), percent_change, self.clock.now_ms());
        rows.push(record.clone());
        Ok(record)
    }

    fn latest(&self) -> Result<Option<CommandRecord>, StoreError> {
        if self.commands_unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "command log offline".to_string(),
            });
        }

        let rows = self.commands.lock().expect("command log mutex poisoned");
        Ok(rows.last().cloned())
    }
}

impl TelemetrySink for MemoryStore {
    fn append_snapshot(&self, snapshot: &TelemetrySnapshot) -> Result<(), StoreError> {
        if self.telemetry_unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "telemetry sink offline".to_string(),
            });
        }

        self.telemetry
            .lock()
            .expect("telemetry mutex poisoned")
            .push(snapshot.clone());
        Ok(())
    }
}

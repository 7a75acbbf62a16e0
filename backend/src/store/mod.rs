//! Store adapter seam
//!
//! The shared command log and the telemetry sink are external collaborators;
//! this module defines the narrow contracts the rest of the system consumes
//! and ships an in-memory implementation used by tests and the bundled CLI.
//!
//! # Contract
//!
//! - `append` hands the record to the store, which assigns the timestamp
//!   (and an id); the adapter never retries on failure, callers decide.
//! - `latest` returns the single most-recently-timestamped record across
//!   all issuers, or nothing while the log is empty.
//! - A transient failure surfaces as `StoreError::Unavailable`. Callers
//!   polling on an interval log it and wait for the next firing; a single
//!   failed round-trip must never take a polling loop down.
//!
//! SQL-backed adapters (the production deployment) live outside this crate;
//! `StoreConfig` carries the knobs they need.

use crate::models::command::CommandRecord;
use crate::models::snapshot::TelemetrySnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Errors surfaced by store adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The underlying store could not be reached (transient I/O)
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Append-only, timestamp-ordered command log.
pub trait CommandLog: Send + Sync {
    /// Append a command under the given issuer identity. The store assigns
    /// the timestamp; the returned record carries it.
    fn append(&self, issuer: &str, percent_change: i64) -> Result<CommandRecord, StoreError>;

    /// The most-recently-timestamped record across all issuers, if any.
    fn latest(&self) -> Result<Option<CommandRecord>, StoreError>;
}

/// Sink for periodic simulation snapshots.
pub trait TelemetrySink: Send + Sync {
    /// Persist one snapshot row.
    fn append_snapshot(&self, snapshot: &TelemetrySnapshot) -> Result<(), StoreError>;
}

/// Knobs consumed by store adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the command table/stream a SQL-backed adapter polls.
    /// The in-memory store has no tables and ignores it.
    pub command_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            command_table: "commands".to_string(),
        }
    }
}

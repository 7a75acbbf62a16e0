//! Command record model
//!
//! A command is a relative speed-change request appended to the shared log
//! by an operator. Records are immutable once appended; the store (never the
//! issuer) assigns the timestamp, so the log carries a total order across
//! all issuers regardless of clock skew between operator processes.
//!
//! Controller logic only ever needs "the most recent record". The id and
//! the `(issuer, timestamp)` pair exist for display and debugging.

use serde::{Deserialize, Serialize};

/// Store-assigned millisecond timestamp ordering all records.
pub type TimestampMs = u64;

/// A single speed-change command in the shared log.
///
/// # Example
/// ```
/// use motor_sim_core_rs::CommandRecord;
///
/// let record = CommandRecord::new("ClientA".to_string(), 25, 1_700_000_000_000);
/// assert_eq!(record.issuer(), "ClientA");
/// assert_eq!(record.percent_change(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Unique record identifier (UUID), assigned by the store
    id: String,

    /// Identity the operator was running under at append time
    issuer: String,

    /// Signed relative setpoint change in percent (never zero)
    percent_change: i64,

    /// Store-assigned timestamp; total order across all issuers
    timestamp_ms: TimestampMs,
}

impl CommandRecord {
    /// Create a record with a fresh id. Called by store implementations at
    /// append time; the timestamp must come from the store's clock.
    pub fn new(issuer: String, percent_change: i64, timestamp_ms: TimestampMs) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            issuer,
            percent_change,
            timestamp_ms,
        }
    }

    /// Record identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Issuer identity at append time
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Signed percentage delta
    pub fn percent_change(&self) -> i64 {
        self.percent_change
    }

    /// Store-assigned timestamp
    pub fn timestamp_ms(&self) -> TimestampMs {
        self.timestamp_ms
    }
}

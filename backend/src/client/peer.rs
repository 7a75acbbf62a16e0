//! Peer watch
//!
//! Operators discover each other's commands by polling the shared log, the
//! same way the controller does, but with the opposite issuer filter: only
//! records from a *different* issuer are surfaced, each exactly once, with
//! no cooldown.
//!
//! The issuer comparison uses the identity in effect at poll time, and
//! records the client authored advance the cursor silently; together these
//! keep a rename from ever resurfacing the client's own past commands as
//! peer activity.

use crate::models::command::TimestampMs;
use crate::store::{CommandLog, StoreError};

/// A newly observed command from another issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerNotice {
    pub issuer: String,
    pub percent_change: i64,
    pub timestamp_ms: TimestampMs,
}

/// Process-local high-water mark over observed records.
#[derive(Debug, Clone, Default)]
pub struct PeerWatcher {
    /// Timestamp of the newest record seen so far
    cursor: TimestampMs,
}

impl PeerWatcher {
    /// Create a watcher with its cursor at the epoch: whatever the log
    /// currently holds counts as unseen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a watcher with an explicit starting cursor.
    pub fn with_cursor(cursor: TimestampMs) -> Self {
        Self { cursor }
    }

    /// Current cursor value.
    pub fn cursor(&self) -> TimestampMs {
        self.cursor
    }

    /// One poll: surface the latest record if it is newer than the cursor
    /// and was issued by someone other than `current_identity`.
    pub fn poll(
        &mut self,
        log: &dyn CommandLog,
        current_identity: &str,
    ) -> Result<Option<PeerNotice>, StoreError> {
        let Some(record) = log.latest()? else {
            return Ok(None);
        };

        if record.timestamp_ms() <= self.cursor {
            return Ok(None);
        }
        self.cursor = record.timestamp_ms();

        if record.issuer() == current_identity {
            return Ok(None);
        }

        Ok(Some(PeerNotice {
            issuer: record.issuer().to_string(),
            percent_change: record.percent_change(),
            timestamp_ms: record.timestamp_ms(),
        }))
    }
}

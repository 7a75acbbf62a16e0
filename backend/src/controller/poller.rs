//! Controller command poller
//!
//! Reads the log's latest record and decides whether to fold it into the
//! setpoint. "New" means the record's timestamp is strictly past the last
//! applied timestamp plus the cooldown, so a burst of near-simultaneous
//! commands from different issuers collapses into one applied change per
//! cooldown window. The poller always re-reads whatever is newest, so the
//! latest command in a burst eventually wins; commands superseded inside a
//! window are permanently lost, never buffered.
//!
//! The poller applies commands from *any* issuer. Filtering by issuer is
//! the operator display's concern, not the controller's.

use crate::models::command::TimestampMs;
use crate::sim::SimEngine;
use crate::store::{CommandLog, StoreError};

/// Details of a command the poller just applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCommand {
    pub issuer: String,
    pub percent_change: i64,
    pub timestamp_ms: TimestampMs,
    pub new_setpoint: f64,
}

/// Process-local sync cursor plus the cooldown guard.
///
/// The cursor starts at the epoch and only ever advances. Runtimes that must
/// not replay commands already in the log at startup call [`prime`] once
/// before their first poll.
///
/// [`prime`]: CommandPoller::prime
#[derive(Debug, Clone)]
pub struct CommandPoller {
    /// Timestamp of the last applied command
    cursor: TimestampMs,

    /// Minimum spacing between two applied commands, measured from the
    /// previously applied command's timestamp (not from "now")
    cooldown_ms: u64,
}

impl CommandPoller {
    /// Create a poller with its cursor at the epoch.
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cursor: 0,
            cooldown_ms,
        }
    }

    /// Create a poller with an explicit starting cursor.
    pub fn with_cursor(cooldown_ms: u64, cursor: TimestampMs) -> Self {
        Self {
            cursor,
            cooldown_ms,
        }
    }

    /// Current cursor value.
    pub fn cursor(&self) -> TimestampMs {
        self.cursor
    }

    /// Advance the cursor to the log's current latest record, without
    /// applying it. Commands already in the log before controller startup
    /// are thereby treated as seen.
    pub fn prime(&mut self, log: &dyn CommandLog) -> Result<(), StoreError> {
        if let Some(record) = log.latest()? {
            self.cursor = self.cursor.max(record.timestamp_ms());
        }
        Ok(())
    }

    /// One poll: read the latest record and apply it if it is new and past
    /// the cooldown. Returns what was applied, if anything.
    ///
    /// The caller owns the engine lock for the duration of the call, which
    /// serializes setpoint application against the simulation tick.
    pub fn poll(
        &mut self,
        log: &dyn CommandLog,
        engine: &mut SimEngine,
    ) -> Result<Option<AppliedCommand>, StoreError> {
        let Some(record) = log.latest()? else {
            return Ok(None);
        };

        if record.timestamp_ms() <= self.cursor.saturating_add(self.cooldown_ms) {
            return Ok(None);
        }

        let new_setpoint = engine.apply_command(&record);
        self.cursor = record.timestamp_ms();

        Ok(Some(AppliedCommand {
            issuer: record.issuer().to_string(),
            percent_change: record.percent_change(),
            timestamp_ms: record.timestamp_ms(),
            new_setpoint,
        }))
    }
}

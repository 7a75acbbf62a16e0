//! Monotonic millisecond clock for store-assigned timestamps
//!
//! The command log orders records by a timestamp assigned at append time,
//! independent of any clock skew between operator processes. `LogClock` is
//! the in-process stand-in for that store-side column: it reads wall time
//! but never hands out the same or a smaller value twice.

use crate::models::command::TimestampMs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Issues strictly increasing millisecond timestamps.
///
/// Two appends landing in the same wall-clock millisecond still receive
/// distinct timestamps, so the total order over records is never ambiguous.
///
/// # Example
/// ```
/// use motor_sim_core_rs::LogClock;
///
/// let clock = LogClock::new();
/// let a = clock.now_ms();
/// let b = clock.now_ms();
/// assert!(b > a);
/// ```
#[derive(Debug, Default)]
pub struct LogClock {
    last_ms: AtomicU64,
}

impl LogClock {
    /// Create a new clock.
    pub fn new() -> Self {
        Self {
            last_ms: AtomicU64::new(0),
        }
    }

    /// Current timestamp, bumped past the previously issued one if needed.
    pub fn now_ms(&self) -> TimestampMs {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut last = self.last_ms.load(Ordering::SeqCst);
        loop {
            let next = wall.max(last + 1);
            match self.last_ms.compare_exchange(
                last,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return next,
                Err(observed) => last = observed,
            }
        }
    }
}

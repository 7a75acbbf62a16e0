//! Telemetry writer
//!
//! Advances the simulation one tick, then persists the resulting snapshot.
//! The order is load-bearing: the state must keep advancing even when the
//! sink is down, so the tick always runs first and a sink failure is
//! reported back to the caller instead of short-circuiting it.

use crate::sim::{SimEngine, TickResult};
use crate::store::{StoreError, TelemetrySink};
use std::time::Duration;

/// Drives one tick-and-persist cycle per timer firing.
#[derive(Debug, Clone)]
pub struct TelemetryWriter {
    /// Tick step in seconds, derived from the configured interval
    dt_secs: f64,
}

impl TelemetryWriter {
    /// Create a writer stepping the simulation by the given interval.
    ///
    /// # Panics
    ///
    /// Panics if the interval is zero.
    pub fn new(tick_interval: Duration) -> Self {
        let dt_secs = tick_interval.as_secs_f64();
        assert!(dt_secs > 0.0, "tick interval must be positive");
        Self { dt_secs }
    }

    /// Tick step in seconds.
    pub fn dt_secs(&self) -> f64 {
        self.dt_secs
    }

    /// Advance the engine one tick, then append the snapshot.
    ///
    /// Returns the tick result together with the sink outcome; the tick has
    /// already happened by the time a sink error is reported.
    pub fn run_once(
        &self,
        engine: &mut SimEngine,
        sink: &dyn TelemetrySink,
    ) -> (TickResult, Result<(), StoreError>) {
        let result = engine.tick(self.dt_secs);
        let snapshot = engine.snapshot();
        (result, sink.append_snapshot(&snapshot))
    }
}

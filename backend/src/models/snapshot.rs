//! Telemetry snapshot model
//!
//! One row of the telemetry stream: the five gauges the controller persists
//! after every simulation tick. The sink assigns any row identity/ordering
//! of its own; the snapshot itself is a plain value.

use crate::models::state::MotorState;
use serde::{Deserialize, Serialize};

/// Snapshot of the simulation gauges at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub gas: f64,
    pub battery: f64,
    pub speed: f64,
    pub setpoint: f64,
    pub temperature: f64,
}

impl From<&MotorState> for TelemetrySnapshot {
    fn from(state: &MotorState) -> Self {
        Self {
            gas: state.gas(),
            battery: state.battery(),
            speed: state.speed(),
            setpoint: state.setpoint(),
            temperature: state.temperature(),
        }
    }
}

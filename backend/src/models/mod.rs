//! Domain models for the motor simulator

pub mod command;
pub mod event;
pub mod snapshot;
pub mod state;

// Re-exports
pub use command::{CommandRecord, TimestampMs};
pub use event::{Event, EventLog};
pub use snapshot::TelemetrySnapshot;
pub use state::{MotorMode, MotorState};

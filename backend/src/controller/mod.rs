//! Controller process internals
//!
//! The controller is the single consumer of the command log: the poller
//! discovers and applies commands it has not yet seen, the telemetry writer
//! advances the simulation and persists snapshots, and the runtime gives
//! each of those duties its own fixed-interval worker thread over one
//! shared engine. Exactly one controller instance is assumed per log.

pub mod poller;
pub mod runtime;
pub mod telemetry;

pub use poller::{AppliedCommand, CommandPoller};
pub use runtime::{spawn_controller, ControllerConfig, ControllerHandle};
pub use telemetry::TelemetryWriter;

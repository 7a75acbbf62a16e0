//! Motor Command-Log Simulator - Core Engine
//!
//! Simulates a motor whose target speed is adjusted by multiple independent
//! operators that never talk to each other directly. Coordination happens
//! entirely through a shared, append-only, timestamp-ordered command log:
//! operators append relative speed-change commands, a single controller polls
//! the log and folds the newest unseen command into its PID setpoint, and
//! telemetry snapshots flow back out on a fixed interval.
//!
//! # Architecture
//!
//! - **core**: monotonic log clock (store-assigned timestamps)
//! - **models**: domain types (CommandRecord, MotorState, snapshots, events)
//! - **sim**: PID-driven simulation state machine
//! - **store**: command-log / telemetry-sink adapter traits + in-memory store
//! - **controller**: command poller, telemetry writer, worker runtime
//! - **client**: operator client, peer watcher, worker runtime
//! - **net**: TCP command ingress
//! - **rng**: deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. `speed` and `setpoint` stay within [0, 100] after every mutation
//! 2. Depletion (gas or battery at 0) is terminal and forces setpoint to 0
//! 3. Sync cursors only ever advance; the store assigns all timestamps
//! 4. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod client;
pub mod controller;
pub mod core;
pub mod models;
pub mod net;
pub mod rng;
pub mod sim;
pub mod store;

// Re-exports for convenience
pub use client::{
    parse_line, InputError, LineOutcome, OperatorClient, OperatorConfig, OperatorHandle,
    OperatorInput, PeerNotice, PeerWatcher, SubmitError,
};
pub use controller::{
    spawn_controller, AppliedCommand, CommandPoller, ControllerConfig, ControllerHandle,
    TelemetryWriter,
};
pub use core::clock::LogClock;
pub use models::{
    command::{CommandRecord, TimestampMs},
    event::{Event, EventLog},
    snapshot::TelemetrySnapshot,
    state::{MotorMode, MotorState},
};
pub use rng::NoiseRng;
pub use sim::{SimConfig, SimEngine, SimError, TickResult};
pub use store::{CommandLog, MemoryStore, StoreConfig, StoreError, TelemetrySink};

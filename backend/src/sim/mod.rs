//! PID-driven simulation state machine

pub mod engine;

pub use engine::{SimConfig, SimEngine, SimError, TickResult};

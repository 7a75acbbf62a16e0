//! Simulation Engine
//!
//! Discrete-time PID simulation of the motor. The engine owns the motor
//! state, the deterministic noise source and the audit event log, and
//! exposes exactly two mutating operations:
//!
//! ```text
//! For each tick(dt):
//! 1. If depleted (as of the start of this tick): force setpoint to 0,
//!    clear the previous error, flag the shutdown notice
//! 2. error = setpoint - speed
//! 3. P = Kp*error; integral += error*dt, I = Ki*integral;
//!    D = Kd*(error - prev_error)/dt; output = P + I + D
//! 4. speed += output + uniform noise in [-random_error_max, +random_error_max],
//!    clamped to [0, 100]
//! 5. prev_error = error
//! 6. temperature = 25 + 0.2*speed (derived, not integrated)
//! 7. gas -= gas_decay*speed*dt; battery -= battery_decay*speed*dt (floor 0)
//! 8. Re-check depletion; a newly crossed gauge makes the mode terminal
//! ```
//!
//! `apply_setpoint_delta` is the other mutator; both run on independent
//! timers, so callers must serialize them (the worker runtime holds the
//! engine behind one mutex).
//!
//! # Determinism
//!
//! All randomness flows through the seeded xorshift64* source. Same seed +
//! same config + same command sequence = identical trajectory. A
//! `random_error_max` of zero disables the perturbation entirely.

use crate::models::command::CommandRecord;
use crate::models::event::{Event, EventLog};
use crate::models::snapshot::TelemetrySnapshot;
use crate::models::state::MotorState;
use crate::rng::NoiseRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Complete simulation configuration.
///
/// These are tunables, not hardwired law; the defaults reproduce the
/// reference trajectory used by the regression tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Proportional gain
    pub kp: f64,

    /// Integral gain
    pub ki: f64,

    /// Derivative gain
    pub kd: f64,

    /// Bound of the uniform speed perturbation; 0 disables noise
    pub random_error_max: f64,

    /// Gas drain per unit speed per second
    pub gas_decay: f64,

    /// Battery drain per unit speed per second
    pub battery_decay: f64,

    /// Setpoint at startup
    pub initial_setpoint: f64,

    /// Gas gauge at startup
    pub initial_gas: f64,

    /// Battery gauge at startup
    pub initial_battery: f64,

    /// Seed for the deterministic noise source
    pub rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            kp: 0.5,
            ki: 0.1,
            kd: 0.05,
            random_error_max: 0.5,
            gas_decay: 0.01,
            battery_decay: 0.05,
            initial_setpoint: 100.0,
            initial_gas: 100.0,
            initial_battery: 100.0,
            rng_seed: 12345,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number (1 for the first completed tick)
    pub tick: u64,

    /// Speed after this tick
    pub speed: f64,

    /// Setpoint after this tick
    pub setpoint: f64,

    /// Temperature after this tick
    pub temperature: f64,

    /// Gas gauge after this tick
    pub gas: f64,

    /// Battery gauge after this tick
    pub battery: f64,

    /// True on every tick spent in depleted mode
    pub shutdown_notice: bool,
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

// ============================================================================
// Engine
// ============================================================================

/// Discrete-time PID simulation engine.
///
/// # Example
/// ```
/// use motor_sim_core_rs::{SimConfig, SimEngine};
///
/// let config = SimConfig {
///     random_error_max: 0.0,
///     ..SimConfig::default()
/// };
/// let mut engine = SimEngine::new(config).unwrap();
///
/// let result = engine.tick(0.2);
/// assert_eq!(result.speed, 77.0);
/// ```
pub struct SimEngine {
    /// Physical state of the motor
    state: MotorState,

    /// Tunables
    config: SimConfig,

    /// Deterministic noise source
    rng: NoiseRng,

    /// Audit log (command applications, depletion transition)
    events: EventLog,

    /// Completed tick count
    tick_count: u64,
}

impl SimEngine {
    /// Create a new engine from configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(SimEngine)` - Successfully initialized engine
    /// * `Err(SimError)` - Configuration validation failed
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        Self::validate_config(&config)?;

        let state = MotorState::new(
            config.initial_setpoint,
            config.initial_gas,
            config.initial_battery,
        );
        let rng = NoiseRng::new(config.rng_seed);

        Ok(Self {
            state,
            config,
            rng,
            events: EventLog::new(),
            tick_count: 0,
        })
    }

    /// Validate configuration
    fn validate_config(config: &SimConfig) -> Result<(), SimError> {
        for (name, value) in [
            ("kp", config.kp),
            ("ki", config.ki),
            ("kd", config.kd),
            ("random_error_max", config.random_error_max),
            ("gas_decay", config.gas_decay),
            ("battery_decay", config.battery_decay),
            ("initial_gas", config.initial_gas),
            ("initial_battery", config.initial_battery),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !config.initial_setpoint.is_finite()
            || !(0.0..=100.0).contains(&config.initial_setpoint)
        {
            return Err(SimError::InvalidConfig(format!(
                "initial_setpoint must be within [0, 100], got {}",
                config.initial_setpoint
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current motor state
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Configuration in effect
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Completed tick count
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Audit event log
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Remove and return pending audit events (runtimes forward these)
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Snapshot of the current gauges for the telemetry sink
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.state)
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Advance the simulation one tick of `dt` seconds.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is not a positive finite number.
    pub fn tick(&mut self, dt: f64) -> TickResult {
        assert!(dt.is_finite() && dt > 0.0, "dt must be positive");

        // Step 1: depleted mode forces the target to zero before control runs
        let shutdown_notice = self.state.is_depleted();
        if shutdown_notice {
            self.state.force_zero_setpoint();
        }

        // Steps 2-3: PID terms
        let error = self.state.setpoint() - self.state.speed();
        let proportional = self.config.kp * error;
        let integral = self.state.pid_integral() + error * dt;
        let integral_out = self.config.ki * integral;
        let derivative = (error - self.state.pid_prev_error()) / dt;
        let derivative_out = self.config.kd * derivative;
        let output = proportional + integral_out + derivative_out;

        // Step 4: perturbed speed update, clamped
        let noise = if self.config.random_error_max > 0.0 {
            self.rng.uniform(self.config.random_error_max)
        } else {
            0.0
        };
        self.state.set_speed_clamped(self.state.speed() + output + noise);

        // Step 5
        self.state.record_pid(integral, error);

        // Steps 6-7: derived temperature, resource drain
        self.state.update_temperature();
        self.state
            .decay_resources(self.config.gas_decay, self.config.battery_decay, dt);

        // Step 8
        if self.state.check_depletion() {
            self.events.log(Event::ResourceDepleted {
                tick: self.tick_count + 1,
                gas: self.state.gas(),
                battery: self.state.battery(),
            });
        }

        self.tick_count += 1;
        TickResult {
            tick: self.tick_count,
            speed: self.state.speed(),
            setpoint: self.state.setpoint(),
            temperature: self.state.temperature(),
            gas: self.state.gas(),
            battery: self.state.battery(),
            shutdown_notice,
        }
    }

    /// Apply a relative setpoint change; returns the new setpoint.
    ///
    /// Resets the PID history, since the accumulated integral and previous
    /// error belong to the old target.
    pub fn apply_setpoint_delta(&mut self, percent_change: i64) -> f64 {
        self.state.apply_setpoint_delta(percent_change as f64)
    }

    /// Apply a command record and log the application for auditing.
    ///
    /// The engine is issuer-agnostic; the record's issuer only matters for
    /// the audit trail and operator displays.
    pub fn apply_command(&mut self, record: &CommandRecord) -> f64 {
        let new_setpoint = self.apply_setpoint_delta(record.percent_change());
        self.events.log(Event::CommandApplied {
            tick: self.tick_count,
            issuer: record.issuer().to_string(),
            percent_change: record.percent_change(),
            timestamp_ms: record.timestamp_ms(),
            new_setpoint,
        });
        new_setpoint
    }
}

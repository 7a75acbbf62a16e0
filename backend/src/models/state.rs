//! Motor state
//!
//! Owns the physical state of the simulated motor: speed, setpoint,
//! temperature, the two resource gauges and the PID history. The state is
//! mutated from exactly two call sites, the periodic tick and the setpoint
//! application driven by the command poller; callers serialize those two
//! behind one lock.
//!
//! # Critical Invariants
//!
//! 1. `speed ∈ [0, 100]` and `setpoint ∈ [0, 100]` after every mutation
//! 2. Depletion (`gas <= 0` or `battery <= 0`) is a one-way transition:
//!    once `Depleted`, the mode never returns to `Normal`
//! 3. Changing the setpoint invalidates the accumulated PID history for the
//!    old target, so `pid_integral` and `pid_prev_error` reset to zero

use serde::{Deserialize, Serialize};

/// Operating mode of the simulated motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorMode {
    /// Resources available, PID tracks the operator-driven setpoint
    Normal,

    /// A resource gauge reached zero; setpoint is forced to 0 every tick.
    /// Terminal: resources are never replenished in this design.
    Depleted,
}

/// Complete physical state of the simulated motor.
///
/// # Example
/// ```
/// use motor_sim_core_rs::{MotorMode, MotorState};
///
/// let state = MotorState::new(100.0, 100.0, 100.0);
/// assert_eq!(state.speed(), 0.0);
/// assert_eq!(state.setpoint(), 100.0);
/// assert_eq!(state.mode(), MotorMode::Normal);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorState {
    /// Current motor speed, clamped to [0, 100]
    speed: f64,

    /// Target speed the PID drives toward, clamped to [0, 100]
    setpoint: f64,

    /// Derived each tick as `25 + 0.2 * speed`; never integrated
    temperature: f64,

    /// Gas gauge, floor 0
    gas: f64,

    /// Battery gauge, floor 0
    battery: f64,

    /// Accumulated PID integral term
    pid_integral: f64,

    /// Error from the previous tick (derivative term input)
    pid_prev_error: f64,

    /// Current mode; `Depleted` is terminal
    mode: MotorMode,
}

impl MotorState {
    /// Create a fresh state at standstill.
    ///
    /// Speed starts at 0, temperature at the 25-degree ambient baseline.
    pub fn new(initial_setpoint: f64, initial_gas: f64, initial_battery: f64) -> Self {
        Self {
            speed: 0.0,
            setpoint: initial_setpoint.clamp(0.0, 100.0),
            temperature: 25.0,
            gas: initial_gas.max(0.0),
            battery: initial_battery.max(0.0),
            pid_integral: 0.0,
            pid_prev_error: 0.0,
            mode: MotorMode::Normal,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current speed
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current setpoint
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Current temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Gas gauge level
    pub fn gas(&self) -> f64 {
        self.gas
    }

    /// Battery gauge level
    pub fn battery(&self) -> f64 {
        self.battery
    }

    /// Accumulated PID integral
    pub fn pid_integral(&self) -> f64 {
        self.pid_integral
    }

    /// Previous-tick error
    pub fn pid_prev_error(&self) -> f64 {
        self.pid_prev_error
    }

    /// Current mode
    pub fn mode(&self) -> MotorMode {
        self.mode
    }

    /// True once either resource gauge has reached zero
    pub fn is_depleted(&self) -> bool {
        self.mode == MotorMode::Depleted
    }

    // ========================================================================
    // Mutators (called by the simulation engine only)
    // ========================================================================

    /// Apply a relative setpoint change in percent of the current setpoint.
    ///
    /// `new = clamp(setpoint + setpoint * percent / 100, 0, 100)`. Resets the
    /// PID history: the accumulated integral and previous error belong to the
    /// old target and would distort the response to the new one.
    ///
    /// Returns the new setpoint.
    pub fn apply_setpoint_delta(&mut self, percent_change: f64) -> f64 {
        let change = self.setpoint * percent_change / 100.0;
        self.setpoint = (self.setpoint + change).clamp(0.0, 100.0);
        self.pid_integral = 0.0;
        self.pid_prev_error = 0.0;
        self.setpoint
    }

    /// Force the setpoint to zero and clear the previous error.
    ///
    /// Called at the start of every tick in `Depleted` mode.
    pub fn force_zero_setpoint(&mut self) {
        self.setpoint = 0.0;
        self.pid_prev_error = 0.0;
    }

    /// Set the speed, clamped to [0, 100].
    pub fn set_speed_clamped(&mut self, speed: f64) {
        self.speed = speed.clamp(0.0, 100.0);
    }

    /// Store the PID history produced by the current tick.
    pub fn record_pid(&mut self, integral: f64, error: f64) {
        self.pid_integral = integral;
        self.pid_prev_error = error;
    }

    /// Recompute the derived temperature from the current speed.
    pub fn update_temperature(&mut self) {
        self.temperature = 25.0 + 0.2 * self.speed;
    }

    /// Decay both resource gauges proportionally to speed, floored at zero.
    pub fn decay_resources(&mut self, gas_rate: f64, battery_rate: f64, dt: f64) {
        self.gas = (self.gas - gas_rate * self.speed * dt).max(0.0);
        self.battery = (self.battery - battery_rate * self.speed * dt).max(0.0);
    }

    /// Re-check the depletion condition and transition if newly crossed.
    ///
    /// Returns true only on the tick that performs the transition.
    pub fn check_depletion(&mut self) -> bool {
        if self.mode == MotorMode::Normal && (self.gas <= 0.0 || self.battery <= 0.0) {
            self.mode = MotorMode::Depleted;
            return true;
        }
        false
    }
}

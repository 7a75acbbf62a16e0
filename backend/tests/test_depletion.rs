//! Depleted-mode tests: the transition is terminal and forces the
//! setpoint to zero on every subsequent tick.

use motor_sim_core_rs::{CommandRecord, Event, MotorMode, SimConfig, SimEngine};

const DT: f64 = 0.2;

fn near_empty_gas_config() -> SimConfig {
    SimConfig {
        random_error_max: 0.0,
        initial_gas: 0.1,
        ..SimConfig::default()
    }
}

#[test]
fn test_gas_depletion_is_detected_at_end_of_tick() {
    let mut engine = SimEngine::new(near_empty_gas_config()).unwrap();

    // First tick drains the 0.1 units of gas to the floor.
    let first = engine.tick(DT);
    assert_eq!(first.gas, 0.0);
    assert!(!first.shutdown_notice, "notice starts on the next tick");
    assert_eq!(engine.state().mode(), MotorMode::Depleted);

    // From the second tick on, the setpoint is forced to zero.
    let second = engine.tick(DT);
    assert!(second.shutdown_notice);
    assert_eq!(second.setpoint, 0.0);
}

#[test]
fn test_battery_depletion_is_also_terminal() {
    let config = SimConfig {
        random_error_max: 0.0,
        initial_battery: 0.5,
        ..SimConfig::default()
    };
    let mut engine = SimEngine::new(config).unwrap();

    engine.tick(DT);
    assert_eq!(engine.state().battery(), 0.0);
    assert!(engine.state().is_depleted());
}

#[test]
fn test_no_tick_after_depletion_produces_positive_setpoint() {
    let mut engine = SimEngine::new(near_empty_gas_config()).unwrap();
    engine.tick(DT);
    assert!(engine.state().is_depleted());

    for i in 0..50 {
        // Commands keep arriving; none may stick past the next tick.
        if i % 5 == 0 {
            let record = CommandRecord::new("Insistent".to_string(), 50, 1000 + i);
            engine.apply_command(&record);
        }
        let result = engine.tick(DT);
        assert_eq!(
            result.setpoint, 0.0,
            "tick {} produced a positive setpoint after depletion",
            result.tick
        );
        assert!(result.shutdown_notice);
    }
}

#[test]
fn test_commands_scale_nothing_once_setpoint_is_zero() {
    let mut engine = SimEngine::new(near_empty_gas_config()).unwrap();
    engine.tick(DT);
    engine.tick(DT);
    assert_eq!(engine.state().setpoint(), 0.0);

    // The relative delta multiplies a zero setpoint.
    let record = CommandRecord::new("Insistent".to_string(), 50, 2000);
    assert_eq!(engine.apply_command(&record), 0.0);
}

#[test]
fn test_depletion_event_logged_exactly_once() {
    let mut engine = SimEngine::new(near_empty_gas_config()).unwrap();

    for _ in 0..30 {
        engine.tick(DT);
    }

    let depleted: Vec<_> = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::ResourceDepleted { .. }))
        .collect();
    assert_eq!(depleted.len(), 1);
    assert!(matches!(
        depleted[0],
        Event::ResourceDepleted { tick: 1, .. }
    ));
}

#[test]
fn test_depleted_motor_spins_down() {
    let mut engine = SimEngine::new(near_empty_gas_config()).unwrap();

    for _ in 0..100 {
        engine.tick(DT);
    }
    assert_eq!(engine.state().speed(), 0.0);
    assert_eq!(engine.state().temperature(), 25.0);
}

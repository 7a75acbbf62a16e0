//! Operator input grammar, submission and rename tests.

use motor_sim_core_rs::{
    parse_line, InputError, LineOutcome, MemoryStore, OperatorClient, OperatorInput, SubmitError,
};
use std::sync::Arc;

#[test]
fn test_parse_percentages() {
    assert_eq!(parse_line("25").unwrap(), OperatorInput::SpeedChange(25));
    assert_eq!(parse_line("+25").unwrap(), OperatorInput::SpeedChange(25));
    assert_eq!(parse_line(" -10 ").unwrap(), OperatorInput::SpeedChange(-10));
}

#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(parse_line("").unwrap_err(), InputError::Empty);
    assert_eq!(parse_line("   ").unwrap_err(), InputError::Empty);
    assert!(matches!(parse_line("fast"), Err(InputError::NotANumber(_))));
    assert!(matches!(parse_line("2.5"), Err(InputError::NotANumber(_))));
    assert_eq!(parse_line("0").unwrap_err(), InputError::ZeroChange);
    assert_eq!(parse_line("+0").unwrap_err(), InputError::ZeroChange);
}

#[test]
fn test_parse_setid_forms() {
    assert_eq!(
        parse_line("/setid Bob").unwrap(),
        OperatorInput::SetIdentity("Bob".to_string())
    );
    assert_eq!(
        parse_line("  /setid   Bob  ").unwrap(),
        OperatorInput::SetIdentity("Bob".to_string())
    );
    // Names may contain spaces; only a name that trims away is rejected.
    assert_eq!(
        parse_line("/setid Ops Desk 2").unwrap(),
        OperatorInput::SetIdentity("Ops Desk 2".to_string())
    );
    assert_eq!(parse_line("/setid").unwrap_err(), InputError::EmptyIdentity);
    assert_eq!(
        parse_line("/setid    ").unwrap_err(),
        InputError::EmptyIdentity
    );
}

#[test]
fn test_empty_identity_is_a_startup_error() {
    let store = Arc::new(MemoryStore::new());
    assert!(matches!(
        OperatorClient::new("   ", store),
        Err(InputError::EmptyIdentity)
    ));
}

#[test]
fn test_submit_uses_current_identity() {
    let store = Arc::new(MemoryStore::new());
    let client = OperatorClient::new("Alice", store.clone()).unwrap();

    let record = client.submit(25).unwrap();
    assert_eq!(record.issuer(), "Alice");

    client.set_identity("Bob").unwrap();
    let record = client.submit(-10).unwrap();
    assert_eq!(record.issuer(), "Bob");

    // Past records keep the identity they were appended under.
    let all = store.commands();
    assert_eq!(all[0].issuer(), "Alice");
    assert_eq!(all[1].issuer(), "Bob");
}

#[test]
fn test_zero_delta_is_rejected_before_the_store() {
    let store = Arc::new(MemoryStore::new());
    let client = OperatorClient::new("Alice", store.clone()).unwrap();

    assert!(matches!(
        client.submit(0),
        Err(SubmitError::Input(InputError::ZeroChange))
    ));
    assert_eq!(store.command_count(), 0);
}

#[test]
fn test_handle_line_outcomes() {
    let store = Arc::new(MemoryStore::new());
    let client = OperatorClient::new("Alice", store.clone()).unwrap();

    match client.handle_line("+25").unwrap() {
        LineOutcome::Sent(record) => {
            assert_eq!(record.issuer(), "Alice");
            assert_eq!(record.percent_change(), 25);
        }
        other => panic!("expected Sent, got {:?}", other),
    }

    assert_eq!(
        client.handle_line("/setid Bob").unwrap(),
        LineOutcome::Renamed("Bob".to_string())
    );
    assert_eq!(client.identity(), "Bob");

    // A rejected line changes nothing and appends nothing.
    assert!(client.handle_line("faster!").is_err());
    assert_eq!(store.command_count(), 1);
}

#[test]
fn test_rename_to_empty_keeps_old_identity() {
    let store = Arc::new(MemoryStore::new());
    let client = OperatorClient::new("Alice", store).unwrap();

    assert!(client.set_identity("   ").is_err());
    assert_eq!(client.identity(), "Alice");
}

#[test]
fn test_store_outage_surfaces_through_submit() {
    let store = Arc::new(MemoryStore::new());
    let client = OperatorClient::new("Alice", store.clone()).unwrap();

    store.set_commands_unavailable(true);
    assert!(matches!(client.submit(25), Err(SubmitError::Store(_))));

    store.set_commands_unavailable(false);
    assert!(client.submit(25).is_ok());
}

#[test]
fn test_clones_share_one_identity() {
    let store = Arc::new(MemoryStore::new());
    let client = OperatorClient::new("Alice", store).unwrap();

    let watcher_side = client.clone();
    client.set_identity("Bob").unwrap();
    assert_eq!(watcher_side.identity(), "Bob");
}

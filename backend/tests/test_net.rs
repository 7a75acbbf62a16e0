//! TCP command-ingress tests on an ephemeral port.

use motor_sim_core_rs::net::{send_command, start_command_listener};
use motor_sim_core_rs::{CommandLog, MemoryStore};
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

fn listener() -> (Arc<MemoryStore>, SocketAddr) {
    let store = Arc::new(MemoryStore::new());
    let addr = start_command_listener("127.0.0.1:0", store.clone()).unwrap();
    (store, addr)
}

#[test]
fn test_round_trip_appends_to_log() {
    let (store, addr) = listener();

    let reply = send_command(addr, "ClientA", 25).unwrap();
    assert!(reply.starts_with("ok "), "unexpected reply: {}", reply);

    let record = store.latest().unwrap().unwrap();
    assert_eq!(record.issuer(), "ClientA");
    assert_eq!(record.percent_change(), 25);
    // The reply echoes the store-assigned timestamp.
    assert_eq!(reply, format!("ok {}", record.timestamp_ms()));
}

#[test]
fn test_malformed_line_appends_nothing() {
    let (store, addr) = listener();

    let stream = TcpStream::connect(addr).unwrap();
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);

    writeln!(writer, "not a command at all").unwrap();
    let mut reply = String::new();
    reader.read_line(&mut reply).unwrap();

    assert!(reply.starts_with("error:"), "unexpected reply: {}", reply);
    assert_eq!(store.command_count(), 0);
}

#[test]
fn test_zero_percent_is_rejected() {
    let (store, addr) = listener();

    let reply = send_command(addr, "ClientA", 0).unwrap();
    assert!(reply.starts_with("error:"), "unexpected reply: {}", reply);
    assert_eq!(store.command_count(), 0);
}

#[test]
fn test_store_outage_is_reported_to_the_sender() {
    let (store, addr) = listener();
    store.set_commands_unavailable(true);

    let reply = send_command(addr, "ClientA", 25).unwrap();
    assert!(reply.starts_with("error:"), "unexpected reply: {}", reply);
    assert_eq!(store.command_count(), 0);

    // The listener survives the outage.
    store.set_commands_unavailable(false);
    let reply = send_command(addr, "ClientA", 25).unwrap();
    assert!(reply.starts_with("ok "));
    assert_eq!(store.command_count(), 1);
}

#[test]
fn test_one_connection_carries_many_commands() {
    let (store, addr) = listener();

    let stream = TcpStream::connect(addr).unwrap();
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);

    for (issuer, percent) in [("A", 25), ("B", -10), ("A", 40)] {
        writeln!(writer, "{} {}", issuer, percent).unwrap();
        let mut reply = String::new();
        reader.read_line(&mut reply).unwrap();
        assert!(reply.starts_with("ok "), "unexpected reply: {}", reply);
    }

    let all = store.commands();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].issuer(), "B");
    assert_eq!(all[2].percent_change(), 40);
}

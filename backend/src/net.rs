//! TCP command ingress
//!
//! Lets external processes feed speed-change commands into the shared log
//! without their own store connection: one `"<issuer> <percent>"` line per
//! command, answered with `ok <timestamp>` or `error: <reason>`. Malformed
//! lines append nothing.
//!
//! The listener thread runs for the lifetime of the process; each accepted
//! connection gets its own handler thread.

use crate::store::CommandLog;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors for malformed wire commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("expected '<issuer> <percent>'")]
    MalformedLine,

    #[error("'{0}' is not a valid percentage")]
    InvalidPercent(String),

    #[error("a 0% change would have no effect")]
    ZeroChange,
}

/// Parse one wire line into `(issuer, percent_change)`.
pub fn parse_wire_command(line: &str) -> Result<(String, i64), WireError> {
    let mut parts = line.split_whitespace();
    let issuer = parts.next().ok_or(WireError::MalformedLine)?;
    let percent = parts.next().ok_or(WireError::MalformedLine)?;
    if parts.next().is_some() {
        return Err(WireError::MalformedLine);
    }

    let percent: i64 = percent
        .parse()
        .map_err(|_| WireError::InvalidPercent(percent.to_string()))?;
    if percent == 0 {
        return Err(WireError::ZeroChange);
    }
    Ok((issuer.to_string(), percent))
}

/// Bind a listener and start accepting command connections.
///
/// Returns the bound address (useful with port 0).
pub fn start_command_listener(
    addr: impl ToSocketAddrs,
    log: Arc<dyn CommandLog>,
) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind(addr)?;
    let local_addr = listener.local_addr()?;
    info!(%local_addr, "command listener ready");

    thread::spawn(move || accept_loop(listener, log));
    Ok(local_addr)
}

fn accept_loop(listener: TcpListener, log: Arc<dyn CommandLog>) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    if let Err(err) = handle_connection(stream, log) {
                        warn!(error = %err, "command connection dropped");
                    }
                });
            }
            Err(err) => error!(error = %err, "accept failed"),
        }
    }
}

fn handle_connection(stream: TcpStream, log: Arc<dyn CommandLog>) -> std::io::Result<()> {
    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    for line in reader.lines() {
        let line = line?;
        match parse_wire_command(&line) {
            Ok((issuer, percent_change)) => match log.append(&issuer, percent_change) {
                Ok(record) => {
                    info!(issuer = %record.issuer(), percent_change, "command ingested");
                    writeln!(writer, "ok {}", record.timestamp_ms())?;
                }
                Err(err) => {
                    warn!(error = %err, "command append failed");
                    writeln!(writer, "error: {}", err)?;
                }
            },
            Err(err) => writeln!(writer, "error: {}", err)?,
        }
    }
    Ok(())
}

/// Send a single command to a running listener and return its reply line.
pub fn send_command(
    addr: impl ToSocketAddrs,
    issuer: &str,
    percent_change: i64,
) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr)?;
    writeln!(stream, "{} {}", issuer, percent_change)?;
    stream.flush()?;

    let mut reply = String::new();
    BufReader::new(stream).read_line(&mut reply)?;
    Ok(reply.trim_end().to_string())
}

//! Operator client
//!
//! An operator has two independent duties sharing one identity: submitting
//! speed-change commands to the shared log, and watching the log for peer
//! activity (see [`peer`]). The identity is mutable at runtime; a rename
//! takes effect for every subsequent append and peer comparison, but the
//! log never rewrites the issuer on past records.
//!
//! Input arrives as trimmed lines from whatever line source the host
//! process wires up. Recognized forms: a signed nonzero integer percentage
//! (`+25`, `-10`) or `/setid <name>`. Anything else is rejected with a
//! user-visible message and causes no state change and no append.

use crate::models::command::CommandRecord;
use crate::store::{CommandLog, StoreError};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub mod peer;
pub mod runtime;

pub use peer::{PeerNotice, PeerWatcher};
pub use runtime::{spawn_peer_watcher, OperatorConfig, OperatorHandle};

/// Errors for malformed operator input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("enter a percentage like +25 or -10, or /setid <name>")]
    Empty,

    #[error("'{0}' is not a valid percentage; enter a number like +25 or -10")]
    NotANumber(String),

    #[error("a 0% change would have no effect")]
    ZeroChange,

    #[error("identity must not be empty; usage: /setid <name>")]
    EmptyIdentity,
}

/// Errors from submitting a command
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A recognized line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorInput {
    /// Signed nonzero speed-change percentage
    SpeedChange(i64),

    /// Identity rename
    SetIdentity(String),
}

/// What a handled line did
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A command was appended to the log
    Sent(CommandRecord),

    /// The identity changed
    Renamed(String),
}

/// Parse one trimmed line of operator input.
///
/// # Example
/// ```
/// use motor_sim_core_rs::{parse_line, OperatorInput};
///
/// assert_eq!(parse_line("+25").unwrap(), OperatorInput::SpeedChange(25));
/// assert_eq!(
///     parse_line("/setid Bob").unwrap(),
///     OperatorInput::SetIdentity("Bob".to_string())
/// );
/// assert!(parse_line("fast please").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<OperatorInput, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    if trimmed == "/setid" {
        return Err(InputError::EmptyIdentity);
    }
    if let Some(rest) = trimmed.strip_prefix("/setid ") {
        let name = rest.trim();
        if name.is_empty() {
            return Err(InputError::EmptyIdentity);
        }
        return Ok(OperatorInput::SetIdentity(name.to_string()));
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if value == 0 {
        return Err(InputError::ZeroChange);
    }
    Ok(OperatorInput::SpeedChange(value))
}

/// Command-submitting half of an operator process.
///
/// Cheap to clone; clones share the identity and the log handle, so the
/// peer-watch worker always compares against the identity in effect at
/// poll time.
#[derive(Clone)]
pub struct OperatorClient {
    identity: Arc<Mutex<String>>,
    log: Arc<dyn CommandLog>,
}

impl OperatorClient {
    /// Create a client under the given starting identity.
    ///
    /// An identity that trims to empty is a startup error; the process has
    /// no business appending anonymous commands.
    pub fn new(identity: impl Into<String>, log: Arc<dyn CommandLog>) -> Result<Self, InputError> {
        let identity = identity.into().trim().to_string();
        if identity.is_empty() {
            return Err(InputError::EmptyIdentity);
        }
        Ok(Self {
            identity: Arc::new(Mutex::new(identity)),
            log,
        })
    }

    /// Identity currently in effect.
    pub fn identity(&self) -> String {
        self.identity
            .lock()
            .expect("identity mutex poisoned")
            .clone()
    }

    /// Rename; applies to all subsequent appends and peer comparisons.
    pub fn set_identity(&self, name: &str) -> Result<String, InputError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::EmptyIdentity);
        }
        let mut identity = self.identity.lock().expect("identity mutex poisoned");
        *identity = name.to_string();
        Ok(identity.clone())
    }

    /// Append a speed-change command under the current identity.
    pub fn submit(&self, percent_change: i64) -> Result<CommandRecord, SubmitError> {
        if percent_change == 0 {
            return Err(InputError::ZeroChange.into());
        }
        let issuer = self.identity();
        Ok(self.log.append(&issuer, percent_change)?)
    }

    /// Parse and execute one line of input.
    pub fn handle_line(&self, line: &str) -> Result<LineOutcome, SubmitError> {
        match parse_line(line)? {
            OperatorInput::SpeedChange(percent) => Ok(LineOutcome::Sent(self.submit(percent)?)),
            OperatorInput::SetIdentity(name) => Ok(LineOutcome::Renamed(self.set_identity(&name)?)),
        }
    }

    pub(crate) fn log(&self) -> Arc<dyn CommandLog> {
        Arc::clone(&self.log)
    }
}

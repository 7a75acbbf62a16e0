//! Event types for auditing and live display.
//!
//! The simulation engine records command applications and the depletion
//! transition in an in-memory audit log; worker runtimes additionally
//! forward events over a channel so a host process can render them as they
//! happen (the operator's peer notifications travel the same way).

use crate::models::command::TimestampMs;
use crate::sim::TickResult;

/// A significant state change in the controller or operator runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The command poller folded a log record into the setpoint
    CommandApplied {
        tick: u64,
        issuer: String,
        percent_change: i64,
        timestamp_ms: TimestampMs,
        new_setpoint: f64,
    },

    /// A resource gauge reached zero; emitted once, at the transition
    ResourceDepleted { tick: u64, gas: f64, battery: f64 },

    /// The simulation advanced one tick (channel-only, never audited)
    TickCompleted { result: TickResult },

    /// Peer watch saw a newer record from a different issuer
    PeerCommand {
        issuer: String,
        percent_change: i64,
        timestamp_ms: TimestampMs,
    },
}

impl Event {
    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CommandApplied { .. } => "CommandApplied",
            Event::ResourceDepleted { .. } => "ResourceDepleted",
            Event::TickCompleted { .. } => "TickCompleted",
            Event::PeerCommand { .. } => "PeerCommand",
        }
    }
}

/// Event log for storing and draining engine events.
///
/// A simple wrapper around `Vec<Event>` with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events have been logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in logging order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Remove and return all events (used by runtimes to forward them)
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_drain() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.log(Event::ResourceDepleted {
            tick: 3,
            gas: 0.0,
            battery: 12.0,
        });
        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].event_type(), "ResourceDepleted");

        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }
}

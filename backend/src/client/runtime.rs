//! Operator worker runtime
//!
//! The peer watch runs on its own fixed-interval worker thread, mirroring
//! the controller's timer discipline: a failed store round-trip is dropped
//! (quietly, so it never scribbles over the interactive prompt) and the
//! timer fires again. The prompt itself stays on the host process's thread;
//! this runtime only owns the background duty.

use crate::client::peer::PeerWatcher;
use crate::client::OperatorClient;
use crate::models::event::Event;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Timer settings for the operator workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Peer-watch poll interval in milliseconds
    pub peer_poll_interval_ms: u64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            peer_poll_interval_ms: 250,
        }
    }
}

/// Handle over the running peer-watch worker.
pub struct OperatorHandle {
    events: Receiver<Event>,
    shutdown: Sender<()>,
    worker: JoinHandle<()>,
}

impl OperatorHandle {
    /// Live peer-notification feed.
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Stop the worker and wait for it to finish.
    pub fn shutdown(self) {
        let OperatorHandle {
            shutdown, worker, ..
        } = self;
        drop(shutdown);
        let _ = worker.join();
    }
}

/// Spawn the peer-watch worker for the given client.
pub fn spawn_peer_watcher(client: OperatorClient, config: OperatorConfig) -> OperatorHandle {
    let interval = Duration::from_millis(config.peer_poll_interval_ms);
    let (event_tx, event_rx) = unbounded();
    let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
    let log = client.log();

    let worker = thread::spawn(move || {
        let mut watcher = PeerWatcher::new();
        loop {
            match shutdown_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }

            // The comparison identity is re-read every poll; a rename takes
            // effect immediately.
            match watcher.poll(log.as_ref(), &client.identity()) {
                Ok(Some(notice)) => {
                    info!(
                        issuer = %notice.issuer,
                        percent_change = notice.percent_change,
                        "peer command detected"
                    );
                    let _ = event_tx.send(Event::PeerCommand {
                        issuer: notice.issuer,
                        percent_change: notice.percent_change,
                        timestamp_ms: notice.timestamp_ms,
                    });
                }
                Ok(None) => {}
                Err(err) => debug!(error = %err, "peer poll failed"),
            }
        }
    });

    OperatorHandle {
        events: event_rx,
        shutdown: shutdown_tx,
        worker,
    }
}

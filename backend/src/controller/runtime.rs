//! Controller worker runtime
//!
//! One thread per periodic duty - command polling and telemetry writing -
//! each on its own fixed-interval timer, so a slow store round-trip in one
//! duty never delays the other's next firing. The two simulation mutators
//! are serialized behind a single mutex; store failures are logged and the
//! owning timer simply fires again.
//!
//! Shutdown is signalled by dropping the handle's channel sender; workers
//! observe the disconnect on their next timer wait.

use crate::controller::poller::CommandPoller;
use crate::controller::telemetry::TelemetryWriter;
use crate::models::event::Event;
use crate::sim::SimEngine;
use crate::store::{CommandLog, TelemetrySink};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

/// Timer and cooldown settings for the controller workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Simulation tick + telemetry write interval in milliseconds
    pub tick_interval_ms: u64,

    /// Command poll interval in milliseconds
    pub poll_interval_ms: u64,

    /// Cooldown between applied commands in milliseconds
    pub cooldown_ms: u64,

    /// Seed the sync cursor from the log's latest record at startup, so
    /// commands already in the log are not replayed
    pub prime_cursor: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            poll_interval_ms: 100,
            cooldown_ms: 200,
            prime_cursor: true,
        }
    }
}

/// Handle over the running controller workers.
pub struct ControllerHandle {
    engine: Arc<Mutex<SimEngine>>,
    events: Receiver<Event>,
    shutdown: Sender<()>,
    workers: Vec<JoinHandle<()>>,
}

impl ControllerHandle {
    /// Shared engine, for inspection or host-driven mutation.
    pub fn engine(&self) -> Arc<Mutex<SimEngine>> {
        Arc::clone(&self.engine)
    }

    /// Live event feed (tick results, applied commands, depletion).
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Stop both workers and wait for them to finish.
    pub fn shutdown(self) {
        let ControllerHandle {
            shutdown, workers, ..
        } = self;
        drop(shutdown);
        for worker in workers {
            let _ = worker.join();
        }
    }
}

/// Spawn the polling and telemetry workers over a shared engine.
pub fn spawn_controller(
    engine: SimEngine,
    log: Arc<dyn CommandLog>,
    sink: Arc<dyn TelemetrySink>,
    config: ControllerConfig,
) -> ControllerHandle {
    let engine = Arc::new(Mutex::new(engine));
    let (event_tx, event_rx) = unbounded();
    let (shutdown_tx, shutdown_rx) = bounded::<()>(0);

    let poll_worker = spawn_poll_worker(
        Arc::clone(&engine),
        Arc::clone(&log),
        &config,
        event_tx.clone(),
        shutdown_rx.clone(),
    );
    let telemetry_worker = spawn_telemetry_worker(
        Arc::clone(&engine),
        sink,
        &config,
        event_tx,
        shutdown_rx,
    );

    ControllerHandle {
        engine,
        events: event_rx,
        shutdown: shutdown_tx,
        workers: vec![poll_worker, telemetry_worker],
    }
}

/// Wait out one timer interval; true means keep running.
fn wait_for_next_firing(shutdown: &Receiver<()>, interval: Duration) -> bool {
    match shutdown.recv_timeout(interval) {
        Err(RecvTimeoutError::Timeout) => true,
        Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
    }
}

fn spawn_poll_worker(
    engine: Arc<Mutex<SimEngine>>,
    log: Arc<dyn CommandLog>,
    config: &ControllerConfig,
    events: Sender<Event>,
    shutdown: Receiver<()>,
) -> JoinHandle<()> {
    let interval = Duration::from_millis(config.poll_interval_ms);
    let mut poller = CommandPoller::new(config.cooldown_ms);
    let prime = config.prime_cursor;

    thread::spawn(move || {
        if prime {
            if let Err(err) = poller.prime(log.as_ref()) {
                warn!(error = %err, "cursor prime failed; starting from epoch");
            }
        }

        while wait_for_next_firing(&shutdown, interval) {
            let (outcome, pending) = {
                let mut engine = engine.lock().expect("engine mutex poisoned");
                let outcome = poller.poll(log.as_ref(), &mut engine);
                (outcome, engine.drain_events())
            };

            match outcome {
                Ok(Some(applied)) => info!(
                    issuer = %applied.issuer,
                    percent_change = applied.percent_change,
                    new_setpoint = applied.new_setpoint,
                    "command applied"
                ),
                Ok(None) => {}
                Err(err) => warn!(error = %err, "command poll failed"),
            }

            for event in pending {
                let _ = events.send(event);
            }
        }
    })
}

fn spawn_telemetry_worker(
    engine: Arc<Mutex<SimEngine>>,
    sink: Arc<dyn TelemetrySink>,
    config: &ControllerConfig,
    events: Sender<Event>,
    shutdown: Receiver<()>,
) -> JoinHandle<()> {
    let interval = Duration::from_millis(config.tick_interval_ms);
    let writer = TelemetryWriter::new(interval);

    thread::spawn(move || {
        while wait_for_next_firing(&shutdown, interval) {
            let (result, sink_result, pending) = {
                let mut engine = engine.lock().expect("engine mutex poisoned");
                let (result, sink_result) = writer.run_once(&mut engine, sink.as_ref());
                (result, sink_result, engine.drain_events())
            };

            if let Err(err) = sink_result {
                warn!(error = %err, "telemetry append failed; state still advanced");
            }

            for event in pending {
                if let Event::ResourceDepleted { gas, battery, .. } = &event {
                    warn!(gas, battery, "resources depleted; setpoint forced to 0");
                }
                let _ = events.send(event);
            }
            let _ = events.send(Event::TickCompleted { result });
        }
    })
}

//! Run command - host the controller over the bundled in-memory store.
//!
//! Spawns the polling and telemetry workers, binds the TCP command ingress
//! and, unless running headless, drives an interactive operator prompt with
//! its peer-watch worker. Tick lines, applied commands, depletion alerts and
//! peer notifications render to the console as they happen.

use anyhow::{Context, Result};
use clap::Args;
use crossbeam_channel::select;
use motor_sim_core_rs::client::spawn_peer_watcher;
use motor_sim_core_rs::net::start_command_listener;
use motor_sim_core_rs::{
    spawn_controller, CommandLog, Event, LineOutcome, MemoryStore, OperatorClient, SimEngine,
    TelemetrySink,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::info;

use crate::config::AppConfig;

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON configuration file; library defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Operator identity for the interactive prompt
    #[arg(long)]
    pub identity: Option<String>,

    /// Bind address for the TCP command ingress
    #[arg(long, default_value = "127.0.0.1:7878")]
    pub listen: String,

    /// Run without an operator prompt, until the process is killed
    #[arg(long)]
    pub headless: bool,
}

/// Execute the run command.
pub fn execute(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let store = Arc::new(MemoryStore::new());
    let log: Arc<dyn CommandLog> = store.clone();
    let sink: Arc<dyn TelemetrySink> = store;

    let engine = SimEngine::new(config.sim.clone())?;
    info!(
        command_table = %config.store.command_table,
        "controller starting over the in-memory store"
    );

    let ingress = start_command_listener(&args.listen, log.clone())
        .with_context(|| format!("binding command ingress on {}", args.listen))?;
    println!("[NET] command ingress listening on {}", ingress);

    let controller = spawn_controller(engine, log.clone(), sink, config.controller.clone());

    if args.headless {
        // No prompt; render the controller feed until the process is killed.
        for event in controller.events().iter() {
            render_event(&event);
        }
        controller.shutdown();
        return Ok(());
    }

    let identity = args
        .identity
        .or(config.default_identity)
        .context("no operator identity; pass --identity or set default_identity in the config")?;
    let client = OperatorClient::new(identity, log)?;
    let watcher = spawn_peer_watcher(client.clone(), config.operator.clone());

    let ctrl_events = controller.events().clone();
    let peer_events = watcher.events().clone();
    let render = thread::spawn(move || loop {
        select! {
            recv(ctrl_events) -> event => match event {
                Ok(event) => render_event(&event),
                Err(_) => break,
            },
            recv(peer_events) -> event => match event {
                Ok(event) => render_event(&event),
                Err(_) => break,
            },
        }
    });

    println!(
        "[{}] enter a signed percentage (+25, -10) or /setid <name>; Ctrl+D quits",
        client.identity()
    );
    for line in io::stdin().lock().lines() {
        let line = line.context("reading operator input")?;
        match client.handle_line(&line) {
            Ok(LineOutcome::Sent(record)) => println!(
                "[SENT] {:+}% as {}",
                record.percent_change(),
                record.issuer()
            ),
            Ok(LineOutcome::Renamed(name)) => println!("[ID] now operating as {}", name),
            Err(err) => println!("[ERR] {}", err),
        }
    }

    info!("input closed; shutting down");
    watcher.shutdown();
    controller.shutdown();
    let _ = render.join();
    Ok(())
}

fn render_event(event: &Event) {
    match event {
        Event::TickCompleted { result } => {
            println!(
                "[LOG] Speed: {:>6.2} | SetPt: {:>6.2} | Temp: {:>6.2} | Gas: {:>4.1}% | Battery: {:>5.1}%",
                result.speed, result.setpoint, result.temperature, result.gas, result.battery
            );
            if result.shutdown_notice {
                println!("[SHUTDOWN] resources exhausted; setpoint held at 0");
            }
        }
        Event::CommandApplied {
            issuer,
            percent_change,
            new_setpoint,
            ..
        } => {
            println!(
                "[CMD] {:+}% from {} -> setpoint {:.2}",
                percent_change, issuer, new_setpoint
            );
        }
        Event::ResourceDepleted { gas, battery, .. } => {
            println!(
                "[ALERT] resources depleted (gas {:.1}, battery {:.1}); motor shutting down",
                gas, battery
            );
        }
        Event::PeerCommand {
            issuer,
            percent_change,
            ..
        } => {
            println!("[PEER] {} sent {:+}%", issuer, percent_change);
        }
    }
}

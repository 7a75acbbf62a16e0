//! Send command - one-shot command submission over the TCP ingress.

use anyhow::{bail, Context, Result};
use clap::Args;
use motor_sim_core_rs::net::send_command;

/// Arguments for the send command.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Address of a running controller's command ingress
    #[arg(long, default_value = "127.0.0.1:7878")]
    pub addr: String,

    /// Issuer identity recorded on the command
    #[arg(long)]
    pub issuer: String,

    /// Signed nonzero speed-change percentage
    #[arg(allow_hyphen_values = true)]
    pub percent: i64,
}

/// Execute the send command.
pub fn execute(args: &SendArgs) -> Result<()> {
    let reply = send_command(&args.addr, &args.issuer, args.percent)
        .with_context(|| format!("sending command to {}", args.addr))?;

    match reply.strip_prefix("ok ") {
        Some(timestamp) => {
            println!("accepted at timestamp {}", timestamp);
            Ok(())
        }
        None => bail!("controller rejected the command: {}", reply),
    }
}

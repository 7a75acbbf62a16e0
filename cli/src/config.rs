//! JSON configuration for the `run` command.
//!
//! Every tunable has a default; an absent file or an absent key falls back
//! to the values the library defaults carry.

use anyhow::{Context, Result};
use motor_sim_core_rs::{ControllerConfig, OperatorConfig, SimConfig, StoreConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete configuration of a controller process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    pub controller: ControllerConfig,
    pub operator: OperatorConfig,
    pub store: StoreConfig,

    /// Identity for the interactive prompt when `--identity` is not passed
    pub default_identity: Option<String>,
}

impl AppConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

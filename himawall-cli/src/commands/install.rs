//! Install command - register the LaunchAgent, then run one update.

use std::path::{Path, PathBuf};

use himawall::config::{config_file_path, Config};

use super::runonce;
use crate::agent;
use crate::error::CliError;

/// Register the periodic LaunchAgent and run one update immediately.
///
/// The config is loaded first so a broken configuration fails before any
/// scheduling entry is written.
pub async fn run(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(config_file_path);
    let config = Config::load_from(&path).map_err(CliError::Config)?;

    agent::install(&path, config.update_interval_minutes).map_err(CliError::Agent)?;
    println!(
        "LaunchAgent installed: {} (every {} minutes)",
        agent::AGENT_LABEL,
        config.update_interval_minutes
    );

    // First update without waiting a full interval
    runonce::run(config_path).await
}

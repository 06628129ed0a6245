//! Stop command - deregister the LaunchAgent.

use crate::agent;
use crate::error::CliError;

/// Unload and remove the LaunchAgent. The current wallpaper and history are
/// left untouched.
pub fn run() -> Result<(), CliError> {
    agent::uninstall().map_err(CliError::Agent)?;
    println!("LaunchAgent removed: {}", agent::AGENT_LABEL);
    Ok(())
}

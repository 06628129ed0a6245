//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes. Partial tile failures are not errors; only
//! unrecoverable setup or run failures land here.

use himawall::config::ConfigError;
use himawall::provider::ProviderError;
use himawall::publisher::PublishError;
use himawall::service::ServiceError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigError),
    /// Failed to create the HTTP client
    Client(ProviderError),
    /// A run failed (total fetch failure, filesystem error, publish error)
    Run(ServiceError),
    /// LaunchAgent installation or removal failed
    Agent(String),
    /// Failed to restore the default background
    Restore(PublishError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for common misconfigurations
        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Himawall reads ~/.himawall/config.json (or --config <path>).");
                eprintln!("The only required field is base_url, e.g.:");
                eprintln!(
                    "  {{\"base_url\": \"https://himawari8-dl.nict.go.jp/himawari.asia/img/D531106\"}}"
                );
            }
            CliError::Run(ServiceError::History(_)) => {
                eprintln!();
                eprintln!("Check that save_dir exists and is writable by your user;");
                eprintln!("protected directories commonly fail under scheduled runs.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Client(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Run(e) => write!(f, "Wallpaper run failed: {}", e),
            CliError::Agent(msg) => write!(f, "LaunchAgent error: {}", msg),
            CliError::Restore(e) => write!(f, "Failed to restore wallpaper: {}", e),
        }
    }
}

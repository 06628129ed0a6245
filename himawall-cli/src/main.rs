//! Himawall CLI - fetch, compose, and publish Himawari-8 wallpapers.
//!
//! Subcommands mirror the lifecycle of the background agent: `install`
//! registers a periodic LaunchAgent and runs one update immediately,
//! `runonce` performs a single update cycle, `stop` deregisters the agent,
//! and `restore` reverts the desktop to the system default background.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod agent;
mod commands;
mod error;

#[derive(Parser)]
#[command(name = "himawall")]
#[command(version = himawall::VERSION)]
#[command(about = "Himawari-8 full-disk satellite desktop wallpaper", long_about = None)]
struct Cli {
    /// Path to the JSON config file (defaults to ~/.himawall/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register the periodic LaunchAgent and run one update immediately
    Install,
    /// Run a single fetch-compose-publish cycle
    Runonce,
    /// Unload and remove the LaunchAgent
    Stop,
    /// Restore the system default desktop background
    Restore,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Install => commands::install::run(cli.config.as_deref()).await,
        Command::Runonce => commands::runonce::run(cli.config.as_deref()).await,
        Command::Stop => commands::stop::run(),
        Command::Restore => commands::restore::run(),
    };

    if let Err(e) = result {
        e.exit();
    }
}

//! Runonce command - one fetch-compose-publish cycle.

use std::path::{Path, PathBuf};
use tracing::info;

use himawall::config::{config_file_path, Config};
use himawall::logging::{default_log_dir, default_log_file, init_logging};
use himawall::provider::ReqwestClient;
use himawall::publisher::DesktopPublisher;
use himawall::service::WallpaperService;

use crate::error::CliError;

/// Run one update cycle against the given (or default) config file.
///
/// A run with partial tile failures still succeeds; only configuration
/// errors, total fetch failure, filesystem errors, and publish failures
/// produce a non-zero exit.
pub async fn run(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(config_file_path);
    let config = Config::load_from(&path).map_err(CliError::Config)?;

    let _guard = init_logging(&default_log_dir(), default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;
    info!(
        version = himawall::VERSION,
        config = %path.display(),
        "himawall starting"
    );

    let client = ReqwestClient::new().map_err(CliError::Client)?;
    let service =
        WallpaperService::new(config, client, DesktopPublisher).map_err(CliError::Run)?;

    let report = service.run_once().await.map_err(CliError::Run)?;

    if report.is_degraded() {
        println!(
            "Wallpaper updated (degraded: {}/{} tiles missing): {}",
            report.failed_tiles,
            report.total_tiles,
            report.output_path.display()
        );
    } else {
        println!("Wallpaper updated: {}", report.output_path.display());
    }
    Ok(())
}

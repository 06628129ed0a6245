//! Logging infrastructure for Himawall.
//!
//! Provides structured logging with file output and console output:
//! - Appends to a daily-rolled file under the log directory (scheduled runs
//!   every few minutes must not clobber each other's history)
//! - Also prints to stdout for interactive runs
//! - Configurable via the RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the logging system.
///
/// Creates the log directory if needed and sets up dual output to a rolling
/// file and stdout. Defaults to INFO when RUST_LOG is unset.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files
/// * `log_file` - Log filename prefix (e.g. "himawall.log")
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
///
/// # Errors
///
/// Returns an error if the log directory cannot be created
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Default log directory: `~/.himawall/logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".himawall")
        .join("logs")
}

/// Default log file name prefix.
pub fn default_log_file() -> &'static str {
    "himawall.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_paths() {
        assert_eq!(default_log_file(), "himawall.log");
        assert!(default_log_dir().ends_with(".himawall/logs"));
    }

    #[test]
    fn log_directory_can_be_created_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("logs");
        fs::create_dir_all(&nested).unwrap();
        assert!(nested.exists());
    }

    // Note: init_logging itself installs a global subscriber that can only be
    // set once per process, so its behavior is exercised by running the CLI.
}

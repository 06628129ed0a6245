//! Configuration loading and validation for ~/.himawall/config.json.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::Config;
use crate::grid::SUPPORTED_GRID_SIZES;

/// Configuration errors, all fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON or an unrecognized enum value
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A recognized key holds an out-of-range value
    #[error("invalid configuration: {key} = '{value}' - {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Default config file path: `~/.himawall/config.json`.
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".himawall")
        .join("config.json")
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// The file must exist (`base_url` has no default), parse as JSON, and
    /// pass validation. `save_dir` is tilde-expanded.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = serde_json::from_str(&raw)?;
        config.save_dir = expand_tilde(&config.save_dir);
        config.validate()?;
        Ok(config)
    }

    /// Validate ranges and set membership for all fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "base_url",
                value: "[]".to_string(),
                reason: "at least one mirror base URL is required".to_string(),
            });
        }
        if !SUPPORTED_GRID_SIZES.contains(&self.nd) {
            return Err(ConfigError::InvalidValue {
                key: "nd",
                value: self.nd.to_string(),
                reason: "must be one of 1, 2, 4, 8, 16".to_string(),
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tile_size",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.pic_size.0 == 0 || self.pic_size.1 == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pic_size",
                value: format!("[{}, {}]", self.pic_size.0, self.pic_size.1),
                reason: "width and height must be positive".to_string(),
            });
        }
        if !(self.cover_ratio > 0.0 && self.cover_ratio <= 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "cover_ratio",
                value: self.cover_ratio.to_string(),
                reason: "must be in (0, 1]".to_string(),
            });
        }
        if self.delay_minutes < 0 {
            return Err(ConfigError::InvalidValue {
                key: "delay_minutes",
                value: self.delay_minutes.to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        if self.update_interval_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "update_interval_minutes",
                value: self.update_interval_minutes.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Expand a leading `~` or `~/` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_in(path, dirs::home_dir())
}

fn expand_tilde_in(path: &Path, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.to_str() {
        Some("~") => home,
        Some(s) if s.starts_with("~/") => home.join(&s[2..]),
        _ => path.to_path_buf(),
    }
}

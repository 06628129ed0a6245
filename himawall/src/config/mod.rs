//! Application configuration.
//!
//! Loaded from a JSON file (default `~/.himawall/config.json`). Settings
//! structs live in [`settings`], default values in [`defaults`], and
//! loading/validation in [`file`]. Every field is optional with a documented
//! default except `base_url`.

mod defaults;
mod file;
mod settings;

pub use defaults::*;
pub use file::{config_file_path, ConfigError};
pub use settings::{Config, ScaleMode};

//! Settings structs for the JSON configuration.
//!
//! Pure data types; loading and validation live in [`super::file`].

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

use super::defaults::*;

/// Output scaling policy for fitting the composite to the display.
///
/// Unknown values are rejected at config-load time; there is no string
/// branching downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Scale uniformly to fit entirely within the target, letterboxing the rest
    Fit,
    /// Scale uniformly to cover the target, center-cropping the overflow
    Fill,
    /// Scale each axis independently to match the target exactly
    Stretch,
}

/// Immutable snapshot of all recognized options.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Mirror base URLs in first-to-succeed precedence order.
    /// Accepts a single string or an array; the only required field.
    #[serde(deserialize_with = "one_or_many")]
    pub base_url: Vec<String>,

    /// Publish-latency safety delay in minutes
    #[serde(default = "default_delay_minutes")]
    pub delay_minutes: i64,

    /// Scheduler interval and slot cadence in minutes
    #[serde(default = "default_update_interval_minutes")]
    pub update_interval_minutes: i64,

    /// Tiles per row/column (must be 1, 2, 4, 8, or 16)
    #[serde(default = "default_nd")]
    pub nd: u32,

    /// Tile edge length in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,

    /// Output scaling policy
    #[serde(default = "ScaleMode::default")]
    pub scale_mode: ScaleMode,

    /// Minimum visible fraction under `fill` before letterbox fallback
    #[serde(default = "default_cover_ratio")]
    pub cover_ratio: f64,

    /// Target output size as `[width, height]`
    #[serde(default = "default_pic_size")]
    pub pic_size: (u32, u32),

    /// History retention bound (clamped to at least 1 at the store)
    #[serde(default = "default_max_pic_count")]
    pub max_pic_count: i64,

    /// Directory for generated wallpapers (`~` expands to the home directory)
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

impl Default for ScaleMode {
    fn default() -> Self {
        ScaleMode::Fit
    }
}

/// Accept `"url"` or `["url", ...]` for `base_url`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(url) => vec![url],
        OneOrMany::Many(urls) => urls,
    })
}

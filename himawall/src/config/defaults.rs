//! Default values for all configuration settings.

/// Minutes subtracted from wall-clock time before slot alignment, covering
/// the mirrors' publish latency.
pub const DEFAULT_DELAY_MINUTES: i64 = 30;

/// Provider publishing cadence and scheduler interval, in minutes.
pub const DEFAULT_UPDATE_INTERVAL_MINUTES: i64 = 10;

/// Default grid subdivision (2×2 tiles).
pub const DEFAULT_ND: u32 = 2;

/// Tile edge length in pixels, as published by the mirrors.
pub const DEFAULT_TILE_SIZE: u32 = 550;

/// Minimum visible fraction of the scaled image under `fill` before falling
/// back to letterboxing.
pub const DEFAULT_COVER_RATIO: f64 = 0.95;

/// Default output size (width, height).
pub const DEFAULT_PIC_SIZE: (u32, u32) = (2560, 1440);

/// Default history retention bound.
pub const DEFAULT_MAX_PIC_COUNT: i64 = 20;

/// Default history directory (tilde-expanded at load).
pub const DEFAULT_SAVE_DIR: &str = "~/Pictures/himawall";

pub(super) fn default_delay_minutes() -> i64 {
    DEFAULT_DELAY_MINUTES
}

pub(super) fn default_update_interval_minutes() -> i64 {
    DEFAULT_UPDATE_INTERVAL_MINUTES
}

pub(super) fn default_nd() -> u32 {
    DEFAULT_ND
}

pub(super) fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

pub(super) fn default_cover_ratio() -> f64 {
    DEFAULT_COVER_RATIO
}

pub(super) fn default_pic_size() -> (u32, u32) {
    DEFAULT_PIC_SIZE
}

pub(super) fn default_max_pic_count() -> i64 {
    DEFAULT_MAX_PIC_COUNT
}

pub(super) fn default_save_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_SAVE_DIR)
}

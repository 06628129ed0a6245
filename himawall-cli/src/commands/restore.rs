//! Restore command - revert to the system default background.

use himawall::publisher::{DesktopPublisher, WallpaperPublisher};

use crate::error::CliError;

/// Restore every desktop to the system default background image.
pub fn run() -> Result<(), CliError> {
    DesktopPublisher.restore().map_err(CliError::Restore)?;
    println!("Wallpaper restored to system default");
    Ok(())
}

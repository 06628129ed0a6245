//! Desktop wallpaper publishing.
//!
//! The pipeline hands a finished image path to a [`WallpaperPublisher`];
//! the production implementation drives macOS System Events through
//! `osascript`. The trait seam keeps the pipeline testable without touching
//! the real desktop.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::info;

/// Errors applying or restoring the desktop background.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Could not spawn the scripting host
    #[error("failed to run osascript: {0}")]
    Spawn(#[from] std::io::Error),

    /// The scripting host ran but reported failure
    #[error("osascript exited with status {status}: {stderr}")]
    ScriptFailed { status: i32, stderr: String },
}

/// Applies a finished image as the desktop background, per display.
pub trait WallpaperPublisher {
    /// Set the image at `image_path` as the background on every desktop.
    fn apply(&self, image_path: &Path) -> Result<(), PublishError>;

    /// Revert every desktop to the system default background.
    fn restore(&self) -> Result<(), PublishError>;
}

/// macOS publisher driving System Events through `osascript`.
pub struct DesktopPublisher;

impl DesktopPublisher {
    fn run_script(script: &str) -> Result<(), PublishError> {
        let output = Command::new("osascript").arg("-e").arg(script).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(PublishError::ScriptFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl WallpaperPublisher for DesktopPublisher {
    fn apply(&self, image_path: &Path) -> Result<(), PublishError> {
        Self::run_script(&apply_script(image_path))?;
        info!(path = %image_path.display(), "wallpaper applied to all desktops");
        Ok(())
    }

    fn restore(&self) -> Result<(), PublishError> {
        Self::run_script(restore_script())?;
        info!("wallpaper restored to system default");
        Ok(())
    }
}

fn apply_script(image_path: &Path) -> String {
    format!(
        r#"tell application "System Events" to tell every desktop to set picture to "{}""#,
        image_path.display()
    )
}

fn restore_script() -> &'static str {
    r#"tell application "System Events"
    set desktopCount to count of desktops
    repeat with desktopNumber from 1 to desktopCount
        tell desktop desktopNumber
            set picture to (path to pictures folder as string) & "DefaultDesktop.jpg"
        end tell
    end repeat
end tell"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_script_embeds_the_image_path() {
        let script = apply_script(Path::new("/tmp/himawall/2d_550_20240301124000.png"));
        assert!(script.contains(r#"set picture to "/tmp/himawall/2d_550_20240301124000.png""#));
        assert!(script.contains("every desktop"));
    }

    #[test]
    fn restore_script_targets_all_desktops() {
        let script = restore_script();
        assert!(script.contains("repeat with desktopNumber"));
        assert!(script.contains("DefaultDesktop.jpg"));
    }
}

//! LaunchAgent registration for periodic runs (macOS launchd).
//!
//! `install` writes a per-user LaunchAgent plist pointing at this binary's
//! `runonce` subcommand and loads it; launchd then serializes invocations at
//! the configured interval. `uninstall` unloads and removes the plist.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// launchd label for the Himawall agent.
pub const AGENT_LABEL: &str = "com.himawall.agent";

/// Path of the per-user LaunchAgent plist.
pub fn plist_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "cannot determine home directory".to_string())?;
    Ok(home
        .join("Library")
        .join("LaunchAgents")
        .join(format!("{}.plist", AGENT_LABEL)))
}

/// Write the agent plist and load it into launchd.
///
/// The agent runs `himawall runonce --config <config_path>` every
/// `interval_minutes`, starting immediately at load, with stdout/stderr
/// redirected to `~/Library/Logs/himawall.{out,err}`.
pub fn install(config_path: &Path, interval_minutes: i64) -> Result<(), String> {
    let exe = std::env::current_exe()
        .map_err(|e| format!("cannot locate current executable: {}", e))?;
    let home = dirs::home_dir().ok_or_else(|| "cannot determine home directory".to_string())?;
    let log_dir = home.join("Library").join("Logs");

    let plist = plist_content(&exe, config_path, interval_minutes, &log_dir);
    let path = plist_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
    }
    fs::write(&path, plist).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;

    launchctl("load", &path)
}

/// Unload the agent from launchd and remove the plist.
///
/// A no-op when the plist does not exist. Unload failures are tolerated
/// (the agent may not be loaded); removal failures are not.
pub fn uninstall() -> Result<(), String> {
    let path = plist_path()?;
    if !path.exists() {
        return Ok(());
    }

    // Best effort: the agent may already be unloaded
    let _ = launchctl("unload", &path);

    fs::remove_file(&path).map_err(|e| format!("cannot remove {}: {}", path.display(), e))
}

fn launchctl(action: &str, plist: &Path) -> Result<(), String> {
    let status = Command::new("launchctl")
        .arg(action)
        .arg(plist)
        .status()
        .map_err(|e| format!("cannot run launchctl: {}", e))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!(
            "launchctl {} {} exited with {}",
            action,
            plist.display(),
            status
        ))
    }
}

fn plist_content(exe: &Path, config_path: &Path, interval_minutes: i64, log_dir: &Path) -> String {
    let interval_secs = interval_minutes.max(1) * 60;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN"
"http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exe}</string>
        <string>runonce</string>
        <string>--config</string>
        <string>{config}</string>
    </array>
    <key>StartInterval</key>
    <integer>{interval}</integer>
    <key>RunAtLoad</key>
    <true/>
    <key>StandardOutPath</key>
    <string>{logs}/himawall.out</string>
    <key>StandardErrorPath</key>
    <string>{logs}/himawall.err</string>
</dict>
</plist>
"#,
        label = AGENT_LABEL,
        exe = exe.display(),
        config = config_path.display(),
        interval = interval_secs,
        logs = log_dir.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plist_encodes_interval_in_seconds() {
        let plist = plist_content(
            Path::new("/usr/local/bin/himawall"),
            Path::new("/home/u/.himawall/config.json"),
            10,
            Path::new("/home/u/Library/Logs"),
        );
        assert!(plist.contains("<integer>600</integer>"));
    }

    #[test]
    fn plist_invokes_runonce_with_config() {
        let plist = plist_content(
            Path::new("/usr/local/bin/himawall"),
            Path::new("/home/u/.himawall/config.json"),
            10,
            Path::new("/home/u/Library/Logs"),
        );
        assert!(plist.contains("<string>/usr/local/bin/himawall</string>"));
        assert!(plist.contains("<string>runonce</string>"));
        assert!(plist.contains("<string>--config</string>"));
        assert!(plist.contains("<string>/home/u/.himawall/config.json</string>"));
        assert!(plist.contains(AGENT_LABEL));
    }

    #[test]
    fn plist_clamps_non_positive_interval() {
        let plist = plist_content(
            Path::new("/bin/himawall"),
            Path::new("/cfg.json"),
            0,
            Path::new("/logs"),
        );
        assert!(plist.contains("<integer>60</integer>"));
    }
}

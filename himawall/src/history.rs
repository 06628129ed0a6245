//! Bounded on-disk history of generated wallpapers.
//!
//! Images are written as PNG under names of the form
//! `{nd}d_{tile_size}_{YYYYMMDDHHMMSS}.png`, so the trailing token gives
//! chronological ordering lexically, independent of filesystem clock
//! semantics. Writes are atomic (temp name, then rename) and pruning keeps
//! the collection at or below its capacity bound, oldest-first, without ever
//! touching the just-written entry.

use crate::timeslot::TimeSlot;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the history store.
///
/// All of these fail the current run; earlier entries and the current
/// desktop background are left untouched.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Could not create the history directory
    #[error("failed to create history directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// PNG encoding or temp-file write failed
    #[error("failed to write image {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Rename of the temp file onto its final name failed
    #[error("failed to finalize image {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Could not list the history directory
    #[error("failed to read history directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One persisted wallpaper, ordered by its encoded timestamp token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// `YYYYMMDDHHMMSS` token parsed from the filename
    pub token: String,
    /// Full path of the image file
    pub path: PathBuf,
}

/// Timestamped wallpaper archive with a fixed capacity bound.
pub struct HistoryStore {
    save_dir: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    /// Creates a store over `save_dir` retaining at most
    /// `max(1, max_pic_count)` entries.
    ///
    /// The clamp guarantees the most recent write always survives pruning,
    /// even with a misconfigured non-positive bound.
    pub fn new(save_dir: impl Into<PathBuf>, max_pic_count: i64) -> Self {
        Self {
            save_dir: save_dir.into(),
            max_entries: max_pic_count.max(1) as usize,
        }
    }

    /// Directory this store writes into.
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Persist a fitted image for `slot`, then prune oldest entries.
    ///
    /// The image lands under a temp name first and is renamed into place, so
    /// a process killed mid-write never leaves a partial entry under a
    /// recognized name. Returns the final path.
    pub fn save(
        &self,
        image: &RgbaImage,
        slot: &TimeSlot,
        nd: u32,
        tile_size: u32,
    ) -> Result<PathBuf, HistoryError> {
        fs::create_dir_all(&self.save_dir).map_err(|source| HistoryError::CreateDir {
            path: self.save_dir.clone(),
            source,
        })?;

        let name = format!("{}d_{}_{}.png", nd, tile_size, slot.file_token());
        let final_path = self.save_dir.join(&name);
        // pid-unique temp name tolerates an overlapping invocation
        let tmp_path = self
            .save_dir
            .join(format!(".{}.{}.tmp", name, std::process::id()));

        if let Err(source) = image.save_with_format(&tmp_path, ImageFormat::Png) {
            let _ = fs::remove_file(&tmp_path);
            return Err(HistoryError::Write {
                path: tmp_path,
                source,
            });
        }

        if let Err(source) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(HistoryError::Persist {
                path: final_path,
                source,
            });
        }

        info!(path = %final_path.display(), "wallpaper saved");
        self.prune(&final_path);
        Ok(final_path)
    }

    /// List history entries sorted oldest-first by encoded token.
    ///
    /// Files whose names don't carry a valid token are ignored.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let read_dir = match fs::read_dir(&self.save_dir) {
            Ok(rd) => rd,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new())
            }
            Err(source) => {
                return Err(HistoryError::ReadDir {
                    path: self.save_dir.clone(),
                    source,
                })
            }
        };

        let mut entries: Vec<HistoryEntry> = read_dir
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                parse_token(&path).map(|token| HistoryEntry { token, path })
            })
            .collect();
        entries.sort_by(|a, b| a.token.cmp(&b.token));
        Ok(entries)
    }

    /// The most recent entry, or `None` for an empty history.
    ///
    /// This is the durable "last good wallpaper" notion; it is queried from
    /// disk, never tracked in process memory.
    pub fn latest(&self) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.entries()?.pop())
    }

    /// Delete oldest entries until the capacity bound holds.
    ///
    /// Deletion failures are logged and skipped; pruning never fails the
    /// write that triggered it, and never removes `just_written`, even when
    /// that entry sorts oldest (an overlapping invocation finishing a stale
    /// slot late). Eviction candidates are everything else, oldest first.
    fn prune(&self, just_written: &Path) {
        let mut entries = match self.entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "skipping history prune, directory listing failed");
                return;
            }
        };
        entries.retain(|entry| entry.path != just_written);

        // just_written always counts against the bound
        while entries.len() + 1 > self.max_entries {
            let oldest = entries.remove(0);
            match fs::remove_file(&oldest.path) {
                Ok(()) => {
                    debug!(path = %oldest.path.display(), "evicted old wallpaper");
                }
                Err(e) => {
                    warn!(path = %oldest.path.display(), error = %e, "failed to evict old wallpaper");
                }
            }
        }
    }
}

/// Extract the `YYYYMMDDHHMMSS` token from a history filename.
fn parse_token(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let token = stem.rsplit('_').next()?;
    if token.len() == 14 && token.bytes().all(|b| b.is_ascii_digit()) {
        Some(token.to_string())
    } else {
        None
    }
}

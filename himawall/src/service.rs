//! High-level facade running one full update cycle.
//!
//! One run is: resolve the time slot, assemble the tile grid, fit the
//! composite to the display, persist it to history, then publish it as the
//! desktop background. The service holds no state between runs beyond the
//! filesystem history; an external scheduler re-invokes it at the update
//! interval.

use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::fitter;
use crate::grid::{AssembleError, GridAssembler, GridError, GridSize};
use crate::history::{HistoryError, HistoryStore};
use crate::provider::{AsyncHttpClient, HimawariProvider};
use crate::publisher::{PublishError, WallpaperPublisher};
use crate::timeslot::TimeSlot;

/// Errors that fail a run.
///
/// Per-tile fetch errors never reach this level; they are absorbed into the
/// composite's degraded accounting.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configured grid size is not offered by the mirrors
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Every tile fetch failed; nothing was written or published
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// Could not persist the finished image
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Image was saved but could not be applied as the background
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Summary of one completed run.
#[derive(Debug)]
pub struct RunReport {
    /// The slot that was fetched
    pub slot: TimeSlot,
    /// Where the finished wallpaper was written
    pub output_path: PathBuf,
    /// Grid cells left blank by failed fetches
    pub failed_tiles: u32,
    /// Total cells in the grid
    pub total_tiles: u32,
}

impl RunReport {
    /// Whether the published image has blank cells.
    pub fn is_degraded(&self) -> bool {
        self.failed_tiles > 0
    }
}

/// Facade wiring the pipeline together over injected HTTP and publisher
/// implementations.
pub struct WallpaperService<C, P> {
    config: Config,
    assembler: GridAssembler<C>,
    history: HistoryStore,
    publisher: P,
}

impl<C: AsyncHttpClient, P: WallpaperPublisher> WallpaperService<C, P> {
    /// Builds the pipeline from a validated configuration.
    pub fn new(config: Config, client: C, publisher: P) -> Result<Self, ServiceError> {
        let grid = GridSize::new(config.nd)?;
        let provider =
            HimawariProvider::new(client, config.base_url.clone(), config.nd, config.tile_size);
        let assembler = GridAssembler::new(provider, grid, config.tile_size);
        let history = HistoryStore::new(config.save_dir.clone(), config.max_pic_count);

        Ok(Self {
            config,
            assembler,
            history,
            publisher,
        })
    }

    /// Executes one fetch-compose-publish cycle.
    ///
    /// The desktop background is only touched after the history write has
    /// completed; a run that fails earlier leaves both the history and the
    /// current background untouched.
    pub async fn run_once(&self) -> Result<RunReport, ServiceError> {
        let slot = TimeSlot::now(
            self.config.delay_minutes,
            self.config.update_interval_minutes,
        );
        info!(slot = %slot.path_fragment(), nd = self.config.nd, "starting wallpaper run");

        let composite = self.assembler.assemble(&slot).await?;

        let fitted = fitter::fit_to_size(
            &composite.image,
            self.config.pic_size,
            self.config.scale_mode,
            self.config.cover_ratio,
        );

        let output_path =
            self.history
                .save(&fitted, &slot, self.config.nd, self.config.tile_size)?;

        self.publisher.apply(&output_path)?;

        if composite.is_degraded() {
            warn!(
                failed = composite.failed_tiles,
                total = composite.total_tiles,
                path = %output_path.display(),
                "run completed degraded"
            );
        } else {
            info!(path = %output_path.display(), "run completed");
        }

        Ok(RunReport {
            slot,
            output_path,
            failed_tiles: composite.failed_tiles,
            total_tiles: composite.total_tiles,
        })
    }
}

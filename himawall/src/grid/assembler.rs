//! Concurrent tile download and composite assembly.

use super::coord::{GridSize, TileCoordinate};
use crate::provider::{AsyncHttpClient, HimawariProvider};
use crate::timeslot::TimeSlot;
use futures::stream::{self, StreamExt};
use image::RgbaImage;
use thiserror::Error;
use tracing::{info, warn};

/// Default bound on concurrent tile fetches.
///
/// Keeps a 16×16 grid from opening 256 sockets at once against the mirrors.
pub const DEFAULT_MAX_PARALLEL: usize = 8;

/// Errors that can fail a whole assembly run.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Every tile fetch failed; there is nothing to composite
    #[error("all {total} tiles failed for slot {slot}")]
    AllTilesFailed { slot: String, total: u32 },
}

/// The assembled full-resolution raster plus per-run fetch accounting.
///
/// Cells whose fetch failed are left fully transparent; the fitter flattens
/// them onto the background color.
pub struct Composite {
    /// Assembled raster of exactly `(nd * tile_size)²` pixels
    pub image: RgbaImage,
    /// Number of grid cells left blank
    pub failed_tiles: u32,
    /// Total cells in the grid (ND²)
    pub total_tiles: u32,
}

impl Composite {
    /// Whether at least one cell is blank.
    pub fn is_degraded(&self) -> bool {
        self.failed_tiles > 0
    }
}

/// Orchestrates downloading all ND² tiles of a slot and compositing them.
///
/// Fetches run concurrently with a bounded worker count; every coordinate is
/// accounted for (success or failure) before assembly completes. The run
/// fails only when zero tiles succeed.
pub struct GridAssembler<C> {
    provider: HimawariProvider<C>,
    grid: GridSize,
    tile_size: u32,
    max_parallel: usize,
}

impl<C: AsyncHttpClient> GridAssembler<C> {
    /// Creates an assembler for a given grid geometry.
    pub fn new(provider: HimawariProvider<C>, grid: GridSize, tile_size: u32) -> Self {
        Self {
            provider,
            grid,
            tile_size,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }

    /// Overrides the concurrent-fetch bound.
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// Downloads and composites all tiles for `slot`.
    ///
    /// Failed, undecodable, or wrong-size tiles leave their cell blank and
    /// are counted; the composite is returned as long as at least one tile
    /// succeeded.
    pub async fn assemble(&self, slot: &TimeSlot) -> Result<Composite, AssembleError> {
        let side = self.grid.get() * self.tile_size;
        let total_tiles = self.grid.tile_count();
        let mut canvas = RgbaImage::new(side, side);
        let mut failed_tiles = 0u32;

        let mut results = stream::iter(
            self.grid
                .coordinates()
                .map(|coord| self.provider.fetch_tile(slot, coord)),
        )
        .buffer_unordered(self.max_parallel);

        while let Some(result) = results.next().await {
            match result.data {
                Some(bytes) => {
                    if !self.paste_tile(&mut canvas, result.coord, &bytes) {
                        failed_tiles += 1;
                    }
                }
                None => failed_tiles += 1,
            }
        }

        if failed_tiles == total_tiles {
            return Err(AssembleError::AllTilesFailed {
                slot: slot.path_fragment(),
                total: total_tiles,
            });
        }

        if failed_tiles > 0 {
            warn!(
                failed = failed_tiles,
                total = total_tiles,
                "composite assembled degraded, some cells left blank"
            );
        } else {
            info!(tiles = total_tiles, side = side, "composite assembled");
        }

        Ok(Composite {
            image: canvas,
            failed_tiles,
            total_tiles,
        })
    }

    /// Decodes tile bytes and pastes them at the cell's pixel offset.
    ///
    /// Returns false when the bytes are not a decodable image of exactly
    /// tile_size×tile_size, leaving the cell blank.
    fn paste_tile(&self, canvas: &mut RgbaImage, coord: TileCoordinate, bytes: &[u8]) -> bool {
        let tile = match image::load_from_memory(bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                warn!(
                    row = coord.row(),
                    col = coord.col(),
                    error = %e,
                    "tile decode failed, leaving cell blank"
                );
                return false;
            }
        };

        if tile.dimensions() != (self.tile_size, self.tile_size) {
            warn!(
                row = coord.row(),
                col = coord.col(),
                width = tile.width(),
                height = tile.height(),
                expected = self.tile_size,
                "tile has wrong dimensions, leaving cell blank"
            );
            return false;
        }

        let (x, y) = coord.pixel_offset(self.tile_size);
        image::imageops::replace(canvas, &tile, x as i64, y as i64);
        true
    }
}

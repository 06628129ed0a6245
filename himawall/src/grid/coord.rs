//! Grid dimensions and tile coordinates.

use thiserror::Error;

/// Grid dimensions offered by the tile mirrors (tiles per row/column).
pub const SUPPORTED_GRID_SIZES: [u32; 5] = [1, 2, 4, 8, 16];

/// Errors for invalid grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid size not offered by the mirrors
    #[error("unsupported grid size {0}, expected one of 1, 2, 4, 8, 16")]
    UnsupportedSize(u32),
}

/// Validated tiles-per-row/column count (ND).
///
/// The mirrors publish the full disk at a fixed set of subdivisions;
/// construction rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize(u32);

impl GridSize {
    /// Validate a raw ND value from configuration.
    pub fn new(nd: u32) -> Result<Self, GridError> {
        if SUPPORTED_GRID_SIZES.contains(&nd) {
            Ok(Self(nd))
        } else {
            Err(GridError::UnsupportedSize(nd))
        }
    }

    /// Tiles per row/column.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Total number of tiles in the grid (ND²).
    pub fn tile_count(self) -> u32 {
        self.0 * self.0
    }

    /// All coordinates of the grid in row-major order.
    pub fn coordinates(self) -> impl Iterator<Item = TileCoordinate> {
        let nd = self.0;
        (0..nd).flat_map(move |row| (0..nd).map(move |col| TileCoordinate::new(row, col)))
    }
}

/// Address of one tile within the grid, `(row, col) ∈ [0, ND)²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    row: u32,
    col: u32,
}

impl TileCoordinate {
    /// Create a new tile coordinate.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Tile row (Y position in the grid).
    pub fn row(self) -> u32 {
        self.row
    }

    /// Tile column (X position in the grid).
    pub fn col(self) -> u32 {
        self.col
    }

    /// Placement offset `(x, y)` of this tile in the assembled composite.
    pub fn pixel_offset(self, tile_size: u32) -> (u32, u32) {
        (self.col * tile_size, self.row * tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_sizes() {
        for nd in SUPPORTED_GRID_SIZES {
            let grid = GridSize::new(nd).unwrap();
            assert_eq!(grid.get(), nd);
            assert_eq!(grid.tile_count(), nd * nd);
        }
    }

    #[test]
    fn rejects_unsupported_sizes() {
        for nd in [0, 3, 5, 6, 7, 9, 12, 32] {
            assert_eq!(GridSize::new(nd), Err(GridError::UnsupportedSize(nd)));
        }
    }

    #[test]
    fn coordinates_cover_grid_in_row_major_order() {
        let grid = GridSize::new(2).unwrap();
        let coords: Vec<_> = grid.coordinates().collect();
        assert_eq!(
            coords,
            vec![
                TileCoordinate::new(0, 0),
                TileCoordinate::new(0, 1),
                TileCoordinate::new(1, 0),
                TileCoordinate::new(1, 1),
            ]
        );
    }

    #[test]
    fn coordinates_count_matches_tile_count() {
        for nd in SUPPORTED_GRID_SIZES {
            let grid = GridSize::new(nd).unwrap();
            assert_eq!(grid.coordinates().count() as u32, grid.tile_count());
        }
    }

    #[test]
    fn pixel_offset_scales_by_tile_size() {
        let coord = TileCoordinate::new(3, 1);
        assert_eq!(coord.pixel_offset(550), (550, 1650));
    }
}

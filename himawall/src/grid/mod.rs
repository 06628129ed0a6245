//! Tile grid geometry and composite assembly.
//!
//! A full-disk frame is published as an ND×ND grid of fixed-size square
//! tiles. [`GridSize`] validates the supported grid dimensions,
//! [`TileCoordinate`] addresses one cell, and [`GridAssembler`] downloads
//! all cells concurrently and composites them into a single raster.

mod assembler;
mod coord;

pub use assembler::{AssembleError, Composite, GridAssembler, DEFAULT_MAX_PARALLEL};
pub use coord::{GridError, GridSize, TileCoordinate, SUPPORTED_GRID_SIZES};

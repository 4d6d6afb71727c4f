//! State module for the grid engine.
//!
//! This module contains:
//! - Geometry and layout types (`GridSize`, `GridRect`, `Tile`, `Layout`, etc.)
//! - Tile kinds and behavior records attached to tiles at construction
//! - The `TileCatalog` that builds tiles from configuration

mod behavior;
mod catalog;
mod types;

pub use behavior::{
    AspectBand, DEFAULT_TARGET_AREA, ExpandDirection, TileBehavior, TileKind, TileProfile, UNRANKED,
};
pub use catalog::TileCatalog;
pub use types::{
    GridCell, GridRect, GridSize, Layout, Span, Tile, TileFrame, TileId, ViewportMode,
};

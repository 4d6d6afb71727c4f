//! Bento grid layout engine.
//!
//! Positions, resizes and reflows a fixed set of named tiles on a bounded
//! integer board. Every layout this module hands out satisfies three rules:
//! tiles stay inside the board, no two tiles overlap, and every tile is at
//! least its minimum span.
//!
//! # Architecture
//!
//! ```text
//!  preset / candidate layout
//!            │
//!            ▼
//!  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//!  │    Sanitizer     │──▶│   Gap expander   │──▶│    Sanitizer     │  finalize
//!  └──────────────────┘   └──────────────────┘   └──────────────────┘
//!            ▲                      ▲
//!            │ placement search     │ occupancy
//!            │ + shrink ladder      │
//!  ┌──────────────────┐   ┌──────────────────┐
//!  │ Mutation resolver│   │  Shuffle engine  │
//!  │  (move / resize) │   │ (seeded reflow)  │
//!  └──────────────────┘   └──────────────────┘
//!            ▲                      ▲
//!            └──────── LayoutEngine ┘  (drag session, mode changes)
//! ```
//!
//! - [`state`] - Geometry, tiles, layouts, tile kinds and the catalog
//! - [`layout`] - The pure layout algorithms
//! - [`events`] - Drag sessions and pixel-to-cell conversion
//! - [`engine`] - The caller-owned engine value

pub mod engine;
pub mod error;
pub mod events;
pub mod layout;
pub mod state;

pub use engine::LayoutEngine;
pub use error::LayoutError;
pub use events::{CellMetrics, DragOperation, DragSession, DragToken, PointerPosition};
pub use layout::{
    FillerCell, FillerTone, ResizeEdge, empty_cells, expand, filler_cells, finalize,
    finalize_excluding, find_placement, move_candidate, resize_candidate, resolve_mutation,
    sanitize, shuffle,
};
pub use state::{
    AspectBand, ExpandDirection, GridCell, GridRect, GridSize, Layout, Span, Tile, TileBehavior,
    TileCatalog, TileFrame, TileId, TileKind, ViewportMode,
};

//! Drag and resize session state.
//!
//! A session is opened by a pointer-down on a tile (move) or on one of its
//! resize handles, and lives until pointer-up or pointer-cancel. It records
//! the tile's rectangle and the pointer position at the start, so every
//! pointer-move is turned into a candidate relative to the origin rather
//! than to the previous move.
//!
//! # Flow
//!
//! 1. `LayoutEngine::begin_move` / `begin_resize` opens a session and hands
//!    out a `DragToken`
//! 2. Each pointer-move converts the pixel offset into grid deltas with
//!    `CellMetrics` and builds a candidate for the mutation resolver
//! 3. Pointer-up commits through the sanitizer; pointer-cancel just ends
//!    the session

use serde::{Deserialize, Serialize};

use crate::modules::grid::layout::{ResizeEdge, move_candidate, resize_candidate};
use crate::modules::grid::state::{GridRect, GridSize, TileBehavior, TileId};

/// Smallest cell size in pixels produced by `CellMetrics::fit`.
pub const MIN_CELL_PX: f64 = 24.0;

/// Default gap between cells in pixels.
pub const DEFAULT_GAP_PX: f64 = 10.0;

// ============================================================================
// Operation Types
// ============================================================================

/// The kind of drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "edge", rename_all = "lowercase")]
pub enum DragOperation {
    /// The tile follows the pointer.
    Move,
    /// The grabbed edge or corner follows the pointer.
    Resize(ResizeEdge),
}

/// A pointer position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    /// Create a new pointer position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

// ============================================================================
// Cell Metrics
// ============================================================================

/// Pixel size of one board cell and of the gap between cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 120.0,
            cell_height: 120.0,
            gap: DEFAULT_GAP_PX,
        }
    }
}

impl CellMetrics {
    /// Create metrics from explicit cell and gap sizes.
    #[must_use]
    pub const fn new(cell_width: f64, cell_height: f64, gap: f64) -> Self {
        Self { cell_width, cell_height, gap }
    }

    /// Derives cell sizes from the size of the container holding the board.
    ///
    /// Cells never shrink below `MIN_CELL_PX`.
    ///
    /// # Arguments
    ///
    /// * `shell_width` - Container width in pixels
    /// * `shell_height` - Container height in pixels
    /// * `grid` - Board dimensions
    /// * `gap` - Gap between cells in pixels
    #[must_use]
    pub fn fit(shell_width: f64, shell_height: f64, grid: GridSize, gap: f64) -> Self {
        let cols = f64::from(grid.cols);
        let rows = f64::from(grid.rows);
        Self {
            cell_width: ((shell_width - gap * (cols - 1.0)) / cols).max(MIN_CELL_PX),
            cell_height: ((shell_height - gap * (rows - 1.0)) / rows).max(MIN_CELL_PX),
            gap,
        }
    }

    /// Horizontal distance between the origins of two adjacent cells.
    #[must_use]
    pub fn step_x(&self) -> f64 { self.cell_width + self.gap }

    /// Vertical distance between the origins of two adjacent cells.
    #[must_use]
    pub fn step_y(&self) -> f64 { self.cell_height + self.gap }

    /// Converts a pointer offset into whole-cell deltas, rounding to the
    /// nearest cell.
    #[must_use]
    pub fn grid_delta(&self, from: PointerPosition, to: PointerPosition) -> (i32, i32) {
        (
            cells_for(to.x - from.x, self.step_x()),
            cells_for(to.y - from.y, self.step_y()),
        )
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cells_for(delta: f64, step: f64) -> i32 {
    if step <= 0.0 || !delta.is_finite() {
        return 0;
    }
    (delta / step).round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

// ============================================================================
// Drag Session
// ============================================================================

/// Handle returned when a drag starts. Events carrying another token are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragToken(u64);

impl DragToken {
    /// Create a token from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self { Self(raw) }

    /// The raw token value.
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

/// State of an ongoing drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Token issued for this session.
    pub token: DragToken,
    /// Move or resize, with the grabbed edge.
    pub operation: DragOperation,
    /// The tile being dragged.
    pub tile: TileId,
    /// The tile's rectangle when the drag started.
    pub origin: GridRect,
    /// The pointer position when the drag started.
    pub start: PointerPosition,
}

impl DragSession {
    /// Candidate rectangle for a pointer position.
    ///
    /// Moves translate the origin; resizes move the grabbed edges, snap to
    /// the span ladder, and then apply the tile's aspect band.
    #[must_use]
    pub fn candidate(
        &self,
        pointer: PointerPosition,
        metrics: &CellMetrics,
        behavior: &TileBehavior,
        grid: GridSize,
    ) -> GridRect {
        let (delta_cols, delta_rows) = metrics.grid_delta(self.start, pointer);
        match self.operation {
            DragOperation::Move => move_candidate(self.origin, delta_cols, delta_rows, grid),
            DragOperation::Resize(edge) => {
                let resized = resize_candidate(
                    self.origin,
                    edge,
                    delta_cols,
                    delta_rows,
                    behavior.min_span_for(grid),
                    grid,
                );
                behavior.apply_aspect(resized, grid)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Layout algorithms.
//!
//! Every function here is pure: it takes a layout snapshot and returns a new
//! one. Layout operations never fail; when a tile cannot be placed they
//! recover by shrinking, dropping, or returning the previous layout.

mod expand;
mod occupancy;
mod placement;
mod resolve;
mod sanitize;
mod shrink;
mod shuffle;

pub use expand::{MAX_EXPAND_PASSES, expand};
pub use occupancy::{FillerCell, FillerTone, Occupancy, empty_cells, filler_cells};
pub use placement::find_placement;
pub use resolve::{ResizeEdge, move_candidate, resize_candidate, resolve_mutation};
pub use sanitize::sanitize;
pub use shrink::{
    MAX_SHRINK_ATTEMPTS, RetryError, SHUFFLE_SHRINK_ATTEMPTS, SPAN_STEPS, retry_with_shrink,
    shrink_step, smaller_span, snap_span, span_steps,
};
pub use shuffle::{shuffle, shuffle_with_rng};

use crate::modules::grid::state::{GridSize, Layout};

/// Sanitize, grow into gaps, then sanitize again.
#[must_use]
pub fn finalize(layout: &Layout, grid: GridSize) -> Layout {
    finalize_excluding(layout, grid, None)
}

/// Like `finalize`, but never grows the `exclude` tile.
#[must_use]
pub fn finalize_excluding(layout: &Layout, grid: GridSize, exclude: Option<&str>) -> Layout {
    let sanitized = sanitize(layout, grid);
    let expanded = expand(&sanitized, grid, exclude);
    sanitize(&expanded, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::grid::state::{TileCatalog, TileFrame};

    #[test]
    fn test_finalize_fills_pocket_and_stays_valid() {
        let grid = GridSize::new(4, 2);
        let layout = TileCatalog::default().layout_from_frames(&[
            TileFrame::new("a", 0, 0, 2, 2),
            TileFrame::new("b", 0, 0, 1, 1),
        ]);
        let finalized = finalize(&layout, grid);
        assert!(finalized.validate(grid).is_ok());
        assert!(empty_cells(&finalized, grid).is_empty());
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let grid = GridSize::new(8, 7);
        let layout = TileCatalog::default().layout_from_frames(&[
            TileFrame::new("a", 0, 0, 3, 3),
            TileFrame::new("b", 2, 2, 2, 2),
            TileFrame::new("c", 7, 6, 4, 4),
        ]);
        let once = finalize(&layout, grid);
        let twice = finalize(&once, grid);
        assert!(once.same_frames(&twice));
    }

    #[test]
    fn test_finalize_excluding_leaves_tile_alone() {
        let grid = GridSize::new(3, 1);
        let layout = TileCatalog::default().layout_from_frames(&[TileFrame::new("a", 0, 0, 1, 1)]);
        let finalized = finalize_excluding(&layout, grid, Some("a"));
        assert!(finalized.same_frames(&layout));
    }
}

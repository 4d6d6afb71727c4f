//! Sanitizer: repairs an arbitrary layout into a valid one.
//!
//! Tiles are committed one at a time against the tiles already committed.
//! Each tile is normalized, then placed near its current position, shrunk
//! step by step when it does not fit, and finally placed at minimum span
//! anywhere on the board. A tile that fits nowhere is dropped.
//!
//! Locked tiles are committed before the others so that no movable tile can
//! push them away. Within each group the layout order decides who keeps
//! their spot; the output keeps the input order.

use std::collections::HashSet;

use super::placement::find_placement;
use super::shrink::{MAX_SHRINK_ATTEMPTS, retry_with_shrink, shrink_step};
use crate::modules::grid::error::LayoutError;
use crate::modules::grid::state::{GridRect, GridSize, Layout, Tile};

/// Repairs a layout so that every tile is in bounds, at least its minimum
/// span, and overlapping no other tile.
///
/// Duplicate ids keep their first occurrence. The result lists the
/// surviving tiles in input order.
#[must_use]
pub fn sanitize(layout: &Layout, grid: GridSize) -> Layout {
    let mut seen = HashSet::new();
    let unique: Vec<&Tile> = layout.iter().filter(|tile| seen.insert(tile.id.clone())).collect();

    if unique.len() < layout.len() {
        tracing::debug!("grid: sanitize dropped {} duplicate tile(s)", layout.len() - unique.len());
    }

    let commit_order = unique
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.behavior().locked)
        .chain(unique.iter().enumerate().filter(|(_, tile)| !tile.behavior().locked));

    let mut placed: Vec<Option<GridRect>> = vec![None; unique.len()];
    let mut settled: Vec<GridRect> = Vec::with_capacity(unique.len());

    for (index, tile) in commit_order {
        match settle(tile, &settled, grid) {
            Some(rect) => {
                settled.push(rect);
                placed[index] = Some(rect);
            }
            None => {
                let err = LayoutError::Unplaceable {
                    tile: tile.id.clone(),
                    grid,
                };
                tracing::warn!("grid: dropping tile: {err}");
            }
        }
    }

    unique
        .iter()
        .zip(placed)
        .filter_map(|(tile, rect)| rect.map(|rect| tile.with_rect(rect)))
        .collect()
}

/// Places one tile against the already-committed rectangles.
fn settle(tile: &Tile, settled: &[GridRect], grid: GridSize) -> Option<GridRect> {
    let behavior = tile.behavior();
    let min = behavior.min_span_for(grid);
    let working = behavior.normalize(tile.rect, grid);

    retry_with_shrink(
        working,
        MAX_SHRINK_ATTEMPTS,
        |rect| find_placement(*rect, settled, grid),
        |rect| Some(behavior.apply_aspect(shrink_step(*rect, min, grid), grid)),
    )
    .or_else(|err| {
        let last = err.into_last();
        tracing::debug!(
            tile = %tile.id,
            "grid: {}",
            LayoutError::PlacementNotFound {
                tile: tile.id.clone(),
                span: last.span(),
            }
        );
        find_placement(GridRect::from_span(0, 0, min), settled, grid).ok_or(())
    })
    .ok()
}

// ============================================================================
// Tests
// ============================================================================

//! Gap expander: grows tiles into empty cells.
//!
//! Each pass recomputes occupancy and grows exactly one tile by one cell in
//! one direction: the first eligible tile in priority order, in the first of
//! its directions whose new strip is empty. Passes stop when the board has
//! no gap, when no tile can grow, or after `MAX_EXPAND_PASSES`.

use super::occupancy::Occupancy;
use crate::modules::grid::error::LayoutError;
use crate::modules::grid::state::{GridRect, GridSize, Layout, Tile};

/// Ceiling on expansion passes.
pub const MAX_EXPAND_PASSES: usize = 96;

/// Grows tiles into empty cells, skipping `exclude` if given.
///
/// The input must already be valid; every growth keeps it valid.
#[must_use]
pub fn expand(layout: &Layout, grid: GridSize, exclude: Option<&str>) -> Layout {
    let mut tiles = layout.tiles().to_vec();

    let mut order: Vec<usize> = (0..tiles.len()).collect();
    order.sort_by(|&a, &b| {
        (tiles[a].expand_rank(), &tiles[a].id).cmp(&(tiles[b].expand_rank(), &tiles[b].id))
    });

    for pass in 0..MAX_EXPAND_PASSES {
        let occupancy = Occupancy::from_rects(tiles.iter().map(|tile| &tile.rect), grid);
        if !occupancy.has_gap() {
            tracing::trace!("grid: expand finished, board full after {pass} passes");
            return Layout::new(tiles);
        }

        let grown = order.iter().find_map(|&index| {
            grow_once(&tiles[index], &occupancy, grid, exclude).map(|rect| (index, rect))
        });

        let Some((index, rect)) = grown else {
            tracing::trace!("grid: expand finished, nothing can grow after {pass} passes");
            return Layout::new(tiles);
        };

        tracing::trace!(tile = %tiles[index].id, "grid: expand {} -> {rect}", tiles[index].rect);
        tiles[index] = tiles[index].with_rect(rect);
    }

    tracing::debug!(
        "grid: {}",
        LayoutError::IterationBudgetExhausted {
            stage: "gap expansion",
            passes: MAX_EXPAND_PASSES,
        }
    );
    Layout::new(tiles)
}

/// The tile grown by one cell in its first legal direction, if any.
fn grow_once(
    tile: &Tile,
    occupancy: &Occupancy,
    grid: GridSize,
    exclude: Option<&str>,
) -> Option<GridRect> {
    let behavior = tile.behavior();
    if !behavior.can_expand()
        || exclude == Some(tile.id.as_str())
        || tile.rect.area() >= behavior.target_area
    {
        return None;
    }

    behavior.expansion_directions.iter().find_map(|direction| {
        let grown = direction.grow(tile.rect, grid)?;
        (occupancy.is_free(&direction.strip(tile.rect)) && behavior.admits_aspect(grown.w, grown.h))
            .then_some(grown)
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::modules::grid::state::{
        ExpandDirection, TileBehavior, TileCatalog, TileFrame, TileId, TileKind,
    };

    fn entry(id: &str, kind: TileKind, behavior: TileBehavior) -> (TileId, TileKind, TileBehavior) {
        (TileId::new(id), kind, behavior)
    }

    fn catalog() -> TileCatalog {
        TileCatalog::new(
            [
                entry("pin", TileKind::Utility, TileKind::Utility.default_behavior()),
                entry(
                    "small",
                    TileKind::Content,
                    TileBehavior {
                        target_area: 2,
                        ..TileBehavior::default()
                    },
                ),
                entry(
                    "fixed",
                    TileKind::Content,
                    TileBehavior {
                        non_expanding: true,
                        ..TileBehavior::default()
                    },
                ),
                entry(
                    "downward",
                    TileKind::Content,
                    TileBehavior {
                        expansion_directions: smallvec![
                            ExpandDirection::Down,
                            ExpandDirection::Right
                        ],
                        ..TileBehavior::default()
                    },
                ),
                entry(
                    "greedy",
                    TileKind::Content,
                    TileBehavior {
                        target_area: u32::MAX,
                        ..TileBehavior::default()
                    },
                ),
                entry("media", TileKind::Media, TileKind::Media.default_behavior()),
            ],
            &[TileId::new("first"), TileId::new("second")],
        )
    }

    fn rect_of(layout: &Layout, id: &str) -> Option<GridRect> { layout.get(id).map(|t| t.rect) }

    #[test]
    fn test_tile_grows_right_into_gap() {
        let grid = GridSize::new(3, 1);
        let layout = catalog().layout_from_frames(&[TileFrame::new("a", 0, 0, 1, 1)]);
        let expanded = expand(&layout, grid, None);
        assert_eq!(rect_of(&expanded, "a"), Some(GridRect::new(0, 0, 3, 1)));
    }

    #[test]
    fn test_growth_stops_at_target_area() {
        let grid = GridSize::new(4, 1);
        let layout = catalog().layout_from_frames(&[TileFrame::new("small", 0, 0, 1, 1)]);
        let expanded = expand(&layout, grid, None);
        assert_eq!(rect_of(&expanded, "small"), Some(GridRect::new(0, 0, 2, 1)));
    }

    #[test]
    fn test_locked_non_expanding_and_excluded_tiles_stay() {
        let grid = GridSize::new(4, 4);
        let layout = catalog().layout_from_frames(&[
            TileFrame::new("pin", 0, 0, 1, 1),
            TileFrame::new("fixed", 2, 0, 1, 1),
            TileFrame::new("a", 0, 2, 1, 1),
        ]);
        let expanded = expand(&layout, grid, Some("a"));
        assert!(expanded.same_frames(&layout));
    }

    #[test]
    fn test_direction_order_is_respected() {
        let grid = GridSize::new(2, 2);
        let layout = catalog().layout_from_frames(&[TileFrame::new("downward", 0, 0, 1, 1)]);
        let expanded = expand(&layout, grid, None);
        assert_eq!(rect_of(&expanded, "downward"), Some(GridRect::new(0, 0, 2, 2)));
        // The first growth went down, so the tile passed through 1×2
        let one_pass = grow_once(
            &layout.tiles()[0],
            &Occupancy::build(&layout, grid),
            grid,
            None,
        );
        assert_eq!(one_pass, Some(GridRect::new(0, 0, 1, 2)));
    }

    #[test]
    fn test_priority_decides_contested_cell() {
        let grid = GridSize::new(3, 1);
        let layout = catalog().layout_from_frames(&[
            TileFrame::new("second", 0, 0, 1, 1),
            TileFrame::new("first", 2, 0, 1, 1),
        ]);
        let expanded = expand(&layout, grid, None);
        assert_eq!(rect_of(&expanded, "first"), Some(GridRect::new(1, 0, 2, 1)));
        assert_eq!(rect_of(&expanded, "second"), Some(GridRect::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_aspect_band_blocks_growth() {
        let grid = GridSize::new(4, 1);
        let layout = catalog().layout_from_frames(&[TileFrame::new("media", 0, 0, 1, 1)]);
        let expanded = expand(&layout, grid, None);
        assert_eq!(rect_of(&expanded, "media"), Some(GridRect::new(0, 0, 2, 1)));
    }

    #[test]
    fn test_pass_budget_returns_valid_layout() {
        let grid = GridSize::new(100, 1);
        let layout = catalog().layout_from_frames(&[TileFrame::new("greedy", 0, 0, 1, 1)]);
        let expanded = expand(&layout, grid, None);
        let rect = rect_of(&expanded, "greedy");
        assert_eq!(rect, Some(GridRect::new(0, 0, 97, 1)));
        assert!(expanded.validate(grid).is_ok());
    }

    #[test]
    fn test_full_board_is_untouched() {
        let grid = GridSize::new(2, 1);
        let layout = catalog().layout_from_frames(&[
            TileFrame::new("a", 0, 0, 1, 1),
            TileFrame::new("b", 1, 0, 1, 1),
        ]);
        assert!(expand(&layout, grid, None).same_frames(&layout));
    }
}

//! Shuffle engine: randomized full-board reflow.
//!
//! Locked tiles stay where they are and act as the first blockers. Every
//! other tile is visited in a random order (hero tiles and tiles with a
//! shuffle priority first), tries its size options in random order at a
//! random anchor, and falls back to its previous rectangle shrunk along the
//! span ladder. The result goes through `finalize`.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::finalize;
use super::placement::find_placement;
use super::shrink::{SHUFFLE_SHRINK_ATTEMPTS, retry_with_shrink, shrink_step};
use crate::modules::grid::state::{GridRect, GridSize, Layout, Span, Tile, TileKind};

/// Shuffles a layout with a generator seeded from `seed`.
///
/// The same seed and input always give the same layout.
#[must_use]
pub fn shuffle(layout: &Layout, grid: GridSize, seed: u64) -> Layout {
    tracing::debug!(seed, "grid: shuffling {} tiles on the {grid} board", layout.len());
    shuffle_with_rng(layout, grid, &mut StdRng::seed_from_u64(seed))
}

/// Shuffles a layout drawing randomness from `rng`.
#[must_use]
pub fn shuffle_with_rng<R: Rng>(layout: &Layout, grid: GridSize, rng: &mut R) -> Layout {
    if layout.is_empty() {
        return layout.clone();
    }

    let mut placed: Vec<GridRect> = Vec::with_capacity(layout.len());
    let mut rects: HashMap<&str, GridRect> = HashMap::with_capacity(layout.len());

    for tile in layout.iter().filter(|tile| tile.behavior().locked) {
        let rect = tile.behavior().normalize(tile.rect, grid);
        placed.push(rect);
        rects.insert(tile.id.as_str(), rect);
    }

    let mut dynamic: Vec<&Tile> =
        layout.iter().filter(|tile| !tile.behavior().locked).collect();
    dynamic.shuffle(rng);
    dynamic.sort_by_key(|tile| visit_rank(tile));

    for tile in dynamic {
        if rects.contains_key(tile.id.as_str()) {
            continue;
        }

        let Some(rect) = place_random(tile, &placed, grid, rng)
            .or_else(|| place_fallback(tile, &placed, grid))
        else {
            tracing::debug!(tile = %tile.id, "grid: shuffle kept previous rect {}", tile.rect);
            continue;
        };

        placed.push(rect);
        rects.insert(tile.id.as_str(), rect);
    }

    let shuffled: Layout = layout
        .iter()
        .map(|tile| {
            rects
                .get(tile.id.as_str())
                .map_or_else(|| tile.clone(), |&rect| tile.with_rect(rect))
        })
        .collect();

    finalize(&shuffled, grid)
}

/// Visit order bucket: hero tiles, then prioritized tiles, then the rest.
fn visit_rank(tile: &Tile) -> (u8, u8) {
    match (tile.kind(), tile.behavior().shuffle_priority) {
        (TileKind::Hero, _) => (0, 0),
        (_, Some(priority)) => (1, priority),
        (_, None) => (2, 0),
    }
}

/// Tries each size option, in random order, at a random anchor.
fn place_random<R: Rng>(
    tile: &Tile,
    placed: &[GridRect],
    grid: GridSize,
    rng: &mut R,
) -> Option<GridRect> {
    let behavior = tile.behavior();
    let mut options = behavior.shuffle_options(tile.rect.span(), grid);
    options.shuffle(rng);

    options.iter().find_map(|&size| {
        let x = rng.random_range(0..=grid.cols - size.w);
        let y = rng.random_range(0..=grid.rows - size.h);
        let seeded = behavior.apply_aspect(GridRect::from_span(x, y, size), grid);
        find_placement(seeded, placed, grid)
    })
}

/// The previous rectangle clamped into bounds, shrunk until it fits.
fn place_fallback(tile: &Tile, placed: &[GridRect], grid: GridSize) -> Option<GridRect> {
    let min = tile.behavior().min_span_for(grid);
    retry_with_shrink(
        tile.rect.clamp_into(Span::new(1, 1), grid),
        SHUFFLE_SHRINK_ATTEMPTS,
        |rect| find_placement(*rect, placed, grid),
        |rect| Some(shrink_step(*rect, min, grid)),
    )
    .ok()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::modules::grid::state::{TileBehavior, TileCatalog, TileFrame, TileId};

    const MOBILE: GridSize = GridSize::new(4, 10);

    fn catalog() -> TileCatalog {
        TileCatalog::new(
            [
                (TileId::new("pin"), TileKind::Utility, TileKind::Utility.default_behavior()),
                (
                    TileId::new("hero"),
                    TileKind::Hero,
                    TileBehavior {
                        min_span: Span::new(3, 2),
                        size_options: smallvec![Span::new(4, 3), Span::new(3, 2)],
                        ..TileKind::Hero.default_behavior()
                    },
                ),
                (
                    TileId::new("menu"),
                    TileKind::Content,
                    TileBehavior {
                        size_options: smallvec![Span::new(2, 1), Span::new(1, 2)],
                        ..TileBehavior::default()
                    },
                ),
                (
                    TileId::new("first"),
                    TileKind::Content,
                    TileBehavior {
                        shuffle_priority: Some(0),
                        ..TileBehavior::default()
                    },
                ),
            ],
            &[],
        )
    }

    fn board() -> Layout {
        catalog().layout_from_frames(&[
            TileFrame::new("hero", 1, 1, 3, 2),
            TileFrame::new("menu", 0, 0, 2, 1),
            TileFrame::new("a", 0, 3, 2, 2),
            TileFrame::new("b", 2, 3, 2, 3),
            TileFrame::new("first", 0, 5, 2, 1),
            TileFrame::new("pin", 0, 9, 2, 1),
        ])
    }

    #[test]
    fn test_locked_tile_is_unchanged() {
        let layout = board();
        for seed in 0..32 {
            let shuffled = shuffle(&layout, MOBILE, seed);
            assert_eq!(shuffled.get("pin").map(|t| t.rect), Some(GridRect::new(0, 9, 2, 1)));
            assert!(shuffled.validate(MOBILE).is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let layout = board();
        let a = shuffle(&layout, MOBILE, 42);
        let b = shuffle(&layout, MOBILE, 42);
        assert!(a.same_frames(&b));
    }

    #[test]
    fn test_tile_set_is_preserved() {
        let layout = board();
        let shuffled = shuffle(&layout, MOBILE, 7);
        assert_eq!(shuffled.ids(), layout.ids());
    }

    #[test]
    fn test_size_options_are_honored() {
        let layout = board();
        for seed in 0..16 {
            let shuffled = shuffle(&layout, MOBILE, seed);
            let hero = shuffled.get("hero").map(|t| t.rect.span());
            assert!(hero.is_some_and(|span| span.w >= 3 && span.h >= 2), "seed {seed}");
        }
    }

    #[test]
    fn test_visit_order_puts_hero_then_priority_first() {
        let layout = board();
        let hero = layout.get("hero").map(visit_rank);
        let first = layout.get("first").map(visit_rank);
        let plain = layout.get("a").map(visit_rank);
        assert!(hero < first);
        assert!(first < plain);
    }

    #[test]
    fn test_empty_layout() {
        assert!(shuffle(&Layout::default(), MOBILE, 1).is_empty());
    }
}

//! Mutation resolver: one interactive move or resize, with cascading
//! displacement of the tiles it lands on.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::placement::find_placement;
use super::shrink::{MAX_SHRINK_ATTEMPTS, retry_with_shrink, shrink_step, snap_span};
use crate::modules::grid::error::LayoutError;
use crate::modules::grid::state::{GridRect, GridSize, Layout, Span, Tile};

// ============================================================================
// Resize Edge
// ============================================================================

/// Edge or corner grabbed by a resize gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    N,
    E,
    S,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeEdge {
    /// All edges and corners.
    pub const ALL: [Self; 8] =
        [Self::N, Self::E, Self::S, Self::W, Self::Ne, Self::Nw, Self::Se, Self::Sw];

    /// Whether the top edge follows the pointer.
    #[must_use]
    pub const fn north(self) -> bool { matches!(self, Self::N | Self::Ne | Self::Nw) }

    /// Whether the right edge follows the pointer.
    #[must_use]
    pub const fn east(self) -> bool { matches!(self, Self::E | Self::Ne | Self::Se) }

    /// Whether the bottom edge follows the pointer.
    #[must_use]
    pub const fn south(self) -> bool { matches!(self, Self::S | Self::Se | Self::Sw) }

    /// Whether the left edge follows the pointer.
    #[must_use]
    pub const fn west(self) -> bool { matches!(self, Self::W | Self::Nw | Self::Sw) }

    /// Returns the edge name as a static lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::E => "e",
            Self::S => "s",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

impl fmt::Display for ResizeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ResizeEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|edge| edge.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown resize edge '{s}' (expected one of n, e, s, w, ne, nw, se, sw)")
            })
    }
}

// ============================================================================
// Candidate Builders
// ============================================================================

/// The origin translated by a grid delta, kept inside the board.
#[must_use]
pub fn move_candidate(
    origin: GridRect,
    delta_cols: i32,
    delta_rows: i32,
    grid: GridSize,
) -> GridRect {
    GridRect {
        x: offset(origin.x, delta_cols, grid.cols.saturating_sub(origin.w)),
        y: offset(origin.y, delta_rows, grid.rows.saturating_sub(origin.h)),
        ..origin
    }
}

/// The origin resized by moving the grabbed edges by a grid delta.
///
/// Edges are clamped into the board keeping at least one cell, spans snap to
/// the span ladder and are raised to `min`. Dragging the west or north edge
/// keeps the opposite edge anchored.
#[must_use]
pub fn resize_candidate(
    origin: GridRect,
    edge: ResizeEdge,
    delta_cols: i32,
    delta_rows: i32,
    min: Span,
    grid: GridSize,
) -> GridRect {
    let min = min.clamp_to(grid);
    let (x, w) = resize_axis(
        origin.x,
        origin.w,
        (edge.west(), edge.east()),
        delta_cols,
        min.w,
        grid.cols,
    );
    let (y, h) = resize_axis(
        origin.y,
        origin.h,
        (edge.north(), edge.south()),
        delta_rows,
        min.h,
        grid.rows,
    );
    GridRect::new(x, y, w, h)
}

/// Resizes one axis. `grabbed` tells whether the near and far edges move.
fn resize_axis(
    start: u32,
    len: u32,
    grabbed: (bool, bool),
    delta: i32,
    min: u32,
    bound: u32,
) -> (u32, u32) {
    let bound_i = i64::from(bound);
    let mut near = i64::from(start);
    let mut far = near + i64::from(len);
    if grabbed.0 {
        near += i64::from(delta);
    }
    if grabbed.1 {
        far += i64::from(delta);
    }

    let near = near.clamp(0, bound_i - 1);
    let far = far.clamp(near + 1, bound_i);
    let size = snap_span(to_cell(far - near), bound).max(min);
    let size_i = i64::from(size);

    let start = if grabbed.0 {
        (far - size_i).max(0)
    } else if near + size_i > bound_i {
        bound_i - size_i
    } else {
        near
    };

    (to_cell(start), size)
}

fn offset(value: u32, delta: i32, max: u32) -> u32 {
    to_cell((i64::from(value) + i64::from(delta)).clamp(0, i64::from(max)))
}

fn to_cell(value: i64) -> u32 { u32::try_from(value.max(0)).unwrap_or(u32::MAX) }

// ============================================================================
// Resolver
// ============================================================================

/// Applies a candidate rectangle to one tile and relocates every tile it
/// now overlaps.
///
/// The candidate is first normalized with the tile's behavior: minimum
/// span, board bounds and aspect band.
///
/// Displaced tiles are relocated largest overlap first, then nearest center,
/// then by id, each against the candidate, the untouched tiles and the tiles
/// already relocated. A tile that does not fit shrinks along the span ladder
/// and finally tries its minimum span.
///
/// # Returns
///
/// The new layout, or a clone of `layout` if the tile is unknown or some
/// displaced tile cannot be placed at all.
#[must_use]
pub fn resolve_mutation(layout: &Layout, id: &str, candidate: GridRect, grid: GridSize) -> Layout {
    let Some(active) = layout.get(id) else {
        return layout.clone();
    };
    let candidate = active.behavior().normalize(candidate, grid);

    let (displaced, untouched): (Vec<&Tile>, Vec<&Tile>) = layout
        .iter()
        .filter(|tile| tile.id.as_str() != id)
        .partition(|tile| tile.rect.intersects(&candidate));

    if displaced.is_empty() {
        return with_rects(layout, id, candidate, &[]);
    }

    let ranked = rank_displaced(displaced, &candidate);
    let mut blockers: Vec<GridRect> = std::iter::once(candidate)
        .chain(untouched.iter().map(|tile| tile.rect))
        .collect();
    let mut relocated: Vec<(&str, GridRect)> = Vec::with_capacity(ranked.len());

    for tile in ranked {
        let Some(rect) = relocate(tile, &blockers, grid) else {
            tracing::debug!(
                tile = %tile.id,
                "grid: rejecting mutation of '{id}': {}",
                LayoutError::Unplaceable {
                    tile: tile.id.clone(),
                    grid,
                }
            );
            return layout.clone();
        };
        blockers.push(rect);
        relocated.push((tile.id.as_str(), rect));
    }

    let next = with_rects(layout, id, candidate, &relocated);
    if let Some((a, b)) = next.find_overlap() {
        tracing::debug!("grid: rejecting mutation of '{id}': '{}' overlaps '{}'", a.id, b.id);
        return layout.clone();
    }
    next
}

/// Relocation order: larger overlap with the candidate first, then nearer
/// centers, then id.
fn rank_displaced<'a>(mut displaced: Vec<&'a Tile>, candidate: &GridRect) -> Vec<&'a Tile> {
    displaced.sort_by(|a, b| {
        let key = |tile: &Tile| {
            (Reverse(tile.rect.overlap_area(candidate)), tile.rect.center_distance_x2(candidate))
        };
        key(a).cmp(&key(b)).then_with(|| a.id.as_str().cmp(b.id.as_str()))
    });
    displaced
}

/// Finds a new home for a displaced tile.
fn relocate(tile: &Tile, blockers: &[GridRect], grid: GridSize) -> Option<GridRect> {
    let behavior = tile.behavior();
    let min = behavior.min_span_for(grid);
    let working = behavior.apply_aspect(tile.rect.clamp_position(grid), grid);

    retry_with_shrink(
        working,
        MAX_SHRINK_ATTEMPTS,
        |rect| find_placement(*rect, blockers, grid),
        |rect| {
            let shrunk = shrink_step(*rect, min, grid);
            (shrunk.span() != rect.span()).then(|| behavior.apply_aspect(shrunk, grid))
        },
    )
    .or_else(|err| {
        let last = err.into_last();
        let smallest = behavior.apply_aspect(GridRect { w: min.w, h: min.h, ..last }, grid);
        find_placement(smallest, blockers, grid).ok_or(())
    })
    .ok()
}

/// The layout with the active tile and the relocated tiles replaced.
fn with_rects(
    layout: &Layout,
    id: &str,
    candidate: GridRect,
    relocated: &[(&str, GridRect)],
) -> Layout {
    layout
        .iter()
        .map(|tile| {
            if tile.id.as_str() == id {
                return tile.with_rect(candidate);
            }
            relocated
                .iter()
                .find(|(moved, _)| *moved == tile.id.as_str())
                .map_or_else(|| tile.clone(), |&(_, rect)| tile.with_rect(rect))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::grid::layout::sanitize;
    use crate::modules::grid::state::{
        AspectBand, TileBehavior, TileCatalog, TileFrame, TileId, TileKind,
    };

    const DESKTOP: GridSize = GridSize::new(8, 7);

    fn layout(frames: &[TileFrame]) -> Layout { TileCatalog::default().layout_from_frames(frames) }

    fn rect_of(layout: &Layout, id: &str) -> GridRect {
        layout.get(id).map(|t| t.rect).unwrap_or_default()
    }

    #[test]
    fn test_edge_parsing() {
        assert_eq!("se".parse::<ResizeEdge>(), Ok(ResizeEdge::Se));
        assert_eq!(" N ".parse::<ResizeEdge>(), Ok(ResizeEdge::N));
        assert!("up".parse::<ResizeEdge>().is_err());
        assert!(ResizeEdge::Nw.north() && ResizeEdge::Nw.west());
        assert!(!ResizeEdge::Nw.east() && !ResizeEdge::Nw.south());
    }

    #[test]
    fn test_move_candidate_clamps_into_board() {
        let moved = move_candidate(GridRect::new(6, 5, 2, 2), 3, -7, DESKTOP);
        assert_eq!(moved, GridRect::new(6, 0, 2, 2));
    }

    #[test]
    fn test_resize_east_snaps_to_ladder() {
        let origin = GridRect::new(0, 0, 1, 1);
        let resized = resize_candidate(origin, ResizeEdge::E, 2, 0, Span::new(1, 1), DESKTOP);
        // Width 3 is equally far from 2 and 4; the smaller step wins
        assert_eq!(resized, GridRect::new(0, 0, 2, 1));
    }

    #[test]
    fn test_resize_west_keeps_right_edge() {
        let origin = GridRect::new(4, 0, 2, 2);
        let resized = resize_candidate(origin, ResizeEdge::W, -2, 0, Span::new(1, 1), DESKTOP);
        assert_eq!(resized, GridRect::new(2, 0, 4, 2));
    }

    #[test]
    fn test_resize_north_keeps_bottom_edge() {
        let origin = GridRect::new(0, 4, 2, 2);
        let resized = resize_candidate(origin, ResizeEdge::N, 0, -1, Span::new(1, 1), DESKTOP);
        assert_eq!(resized, GridRect::new(0, 4, 2, 2));
    }

    #[test]
    fn test_resize_corner_moves_both_axes() {
        let origin = GridRect::new(0, 0, 1, 1);
        let resized = resize_candidate(origin, ResizeEdge::Se, 1, 3, Span::new(1, 1), DESKTOP);
        assert_eq!(resized, GridRect::new(0, 0, 2, 4));
    }

    #[test]
    fn test_resize_respects_minimum_span() {
        let origin = GridRect::new(0, 0, 2, 2);
        let resized = resize_candidate(origin, ResizeEdge::E, -1, 0, Span::new(2, 2), DESKTOP);
        assert_eq!(resized.span(), Span::new(2, 2));
    }

    #[test]
    fn test_resize_east_past_board_then_aspect_band() {
        let behavior = TileBehavior {
            min_span: Span::new(3, 2),
            aspect_band: Some(AspectBand::HERO),
            ..TileBehavior::default()
        };
        let origin = GridRect::new(0, 0, 3, 2);
        let resized = resize_candidate(origin, ResizeEdge::E, 7, 0, behavior.min_span, DESKTOP);
        assert_eq!(resized.w, 8);
        let clamped = behavior.apply_aspect(resized, DESKTOP);
        assert_eq!(clamped.h, 2);
        assert!(clamped.w <= 8);
        assert!(behavior.admits_aspect(clamped.w, clamped.h));
    }

    #[test]
    fn test_move_without_collision_is_accepted() {
        let input = layout(&[TileFrame::new("a", 0, 0, 2, 2), TileFrame::new("b", 2, 0, 2, 2)]);
        let output = resolve_mutation(&input, "a", GridRect::new(0, 3, 2, 2), DESKTOP);
        assert_eq!(rect_of(&output, "a"), GridRect::new(0, 3, 2, 2));
        assert_eq!(rect_of(&output, "b"), GridRect::new(2, 0, 2, 2));
    }

    #[test]
    fn test_move_displaces_overlapped_tile() {
        let input = layout(&[TileFrame::new("a", 0, 0, 2, 2), TileFrame::new("b", 2, 0, 2, 2)]);
        let output = resolve_mutation(&input, "a", GridRect::new(3, 0, 2, 2), DESKTOP);
        assert_eq!(rect_of(&output, "a"), GridRect::new(3, 0, 2, 2));
        assert_eq!(rect_of(&output, "b"), GridRect::new(1, 0, 2, 2));
        assert!(output.validate(DESKTOP).is_ok());
        assert_eq!(output.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_displaced_tile_shrinks_to_fit() {
        let grid = GridSize::new(3, 2);
        let input = layout(&[TileFrame::new("a", 0, 0, 1, 2), TileFrame::new("b", 1, 0, 2, 2)]);
        let output = resolve_mutation(&input, "a", GridRect::new(0, 0, 2, 2), grid);
        assert_eq!(rect_of(&output, "b"), GridRect::new(2, 0, 1, 2));
        assert!(output.validate(grid).is_ok());
    }

    #[test]
    fn test_unplaceable_displacement_rejects_mutation() {
        let grid = GridSize::new(2, 1);
        let input = layout(&[TileFrame::new("a", 0, 0, 1, 1), TileFrame::new("b", 1, 0, 1, 1)]);
        let output = resolve_mutation(&input, "a", GridRect::new(0, 0, 2, 1), grid);
        assert!(output.same_frames(&input));
    }

    #[test]
    fn test_ranking_prefers_larger_overlap() {
        let grid = GridSize::new(4, 3);
        let input = layout(&[
            TileFrame::new("a", 0, 2, 1, 1),
            TileFrame::new("small", 0, 0, 1, 1),
            TileFrame::new("big", 1, 0, 2, 2),
        ]);
        // `big` overlaps four cells and relocates first, shrinking into the
        // free column; `small` then takes the nearest cell left over.
        let output = resolve_mutation(&input, "a", GridRect::new(0, 0, 3, 2), grid);
        assert!(output.validate(grid).is_ok());
        assert_eq!(rect_of(&output, "big"), GridRect::new(3, 0, 1, 2));
        assert_eq!(rect_of(&output, "small"), GridRect::new(0, 2, 1, 1));
    }

    #[test]
    fn test_ranking_breaks_overlap_ties_by_center_distance() {
        let input = layout(&[
            TileFrame::new("alpha", 3, 2, 3, 1),
            TileFrame::new("zulu", 2, 3, 1, 1),
        ]);
        let candidate = GridRect::new(2, 2, 2, 2);
        let ranked: Vec<&str> = rank_displaced(input.iter().collect(), &candidate)
            .into_iter()
            .map(|tile| tile.id.as_str())
            .collect();
        // One shared cell each; `zulu` sits closer to the candidate's center
        assert_eq!(ranked, ["zulu", "alpha"]);
    }

    #[test]
    fn test_ranking_falls_back_to_id() {
        let input = layout(&[TileFrame::new("b", 2, 2, 1, 1), TileFrame::new("a", 3, 3, 1, 1)]);
        let candidate = GridRect::new(2, 2, 2, 2);
        let ranked: Vec<&str> = rank_displaced(input.iter().collect(), &candidate)
            .into_iter()
            .map(|tile| tile.id.as_str())
            .collect();
        assert_eq!(ranked, ["a", "b"]);
    }

    #[test]
    fn test_candidate_is_pulled_into_aspect_band() {
        let hero = TileBehavior {
            min_span: Span::new(3, 2),
            aspect_band: Some(AspectBand::HERO),
            ..TileKind::Hero.default_behavior()
        };
        let catalog = TileCatalog::new([(TileId::new("hero"), TileKind::Hero, hero.clone())], &[]);
        let input = catalog.layout_from_frames(&[
            TileFrame::new("hero", 0, 0, 3, 2),
            TileFrame::new("a", 4, 4, 1, 1),
            TileFrame::new("b", 6, 6, 1, 1),
        ]);

        let output = resolve_mutation(&input, "hero", GridRect::new(4, 4, 3, 3), DESKTOP);
        let rect = rect_of(&output, "hero");
        assert_eq!(rect, GridRect::new(4, 4, 4, 3));
        assert!(hero.admits_aspect(rect.w, rect.h));
        assert!(output.validate(DESKTOP).is_ok());

        // Committing the drag must not reshape the tile or lose anyone
        let committed = sanitize(&output, DESKTOP);
        assert_eq!(committed.len(), 3);
        assert_eq!(rect_of(&committed, "hero"), rect);
    }

    #[test]
    fn test_unknown_tile_returns_input() {
        let input = layout(&[TileFrame::new("a", 0, 0, 1, 1)]);
        let output = resolve_mutation(&input, "ghost", GridRect::new(3, 3, 1, 1), DESKTOP);
        assert!(output.same_frames(&input));
    }

    #[test]
    fn test_locked_flag_does_not_pin_displaced_tiles() {
        let catalog = TileCatalog::new(
            [(TileId::new("pin"), TileKind::Utility, TileKind::Utility.default_behavior())],
            &[],
        );
        let input = catalog.layout_from_frames(&[
            TileFrame::new("a", 0, 0, 1, 1),
            TileFrame::new("pin", 1, 0, 1, 1),
        ]);
        let output = resolve_mutation(&input, "a", GridRect::new(1, 0, 1, 1), DESKTOP);
        assert!(output.validate(DESKTOP).is_ok());
        assert_ne!(rect_of(&output, "pin"), GridRect::new(1, 0, 1, 1));
    }
}

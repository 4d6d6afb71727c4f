//! Placement search: the closest free position for a rectangle.

use crate::modules::grid::state::{GridRect, GridSize};

/// Finds the free position closest to `rect`'s own origin.
///
/// Every top-left offset in `[0, cols - w] × [0, rows - h]` is scanned row by
/// row. A position is free when it overlaps none of `blockers`; its score is
/// the Manhattan distance to the preferred origin. The first position with
/// the lowest score wins, and a zero score returns immediately.
///
/// # Arguments
///
/// * `rect` - Desired span, positioned at the preferred anchor.
/// * `blockers` - Rectangles the result must not overlap.
/// * `grid` - Board bounds.
///
/// # Returns
///
/// The placed rectangle with `rect`'s span, or `None` if the span does not
/// fit the board or every position is blocked.
#[must_use]
pub fn find_placement(rect: GridRect, blockers: &[GridRect], grid: GridSize) -> Option<GridRect> {
    if rect.w == 0 || rect.h == 0 || rect.w > grid.cols || rect.h > grid.rows {
        return None;
    }

    let max_x = grid.cols - rect.w;
    let max_y = grid.rows - rect.h;
    let mut best: Option<(u32, GridRect)> = None;

    for y in 0..=max_y {
        for x in 0..=max_x {
            let candidate = GridRect { x, y, ..rect };
            if blockers.iter().any(|blocker| candidate.intersects(blocker)) {
                continue;
            }

            let score = rect.origin_distance(x, y);
            if score == 0 {
                return Some(candidate);
            }
            if best.is_none_or(|(best_score, _)| score < best_score) {
                best = Some((score, candidate));
            }
        }
    }

    best.map(|(_, placed)| placed)
}

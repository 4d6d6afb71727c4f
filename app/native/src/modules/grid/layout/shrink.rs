//! The span ladder and the bounded shrink-and-retry loop.
//!
//! Spans snap to a small ladder of allowed sizes (`1, 2, 4, 8`, capped by the
//! board) so that interactive resizes and shrink fallbacks land on a handful
//! of visually consistent sizes instead of every integer.

use smallvec::SmallVec;

use crate::modules::grid::state::{GridRect, GridSize, Span};

/// Allowed span sizes before capping to the board.
pub const SPAN_STEPS: [u32; 4] = [1, 2, 4, 8];

/// Shrink attempts made by the sanitizer and the mutation resolver.
pub const MAX_SHRINK_ATTEMPTS: usize = 24;

/// Shrink attempts made by the shuffle fallback.
pub const SHUFFLE_SHRINK_ATTEMPTS: usize = 18;

// ============================================================================
// Span Ladder
// ============================================================================

/// The ladder for a dimension bounded by `max`: the steps that fit, plus `1`
/// and `max` itself, ascending and without duplicates.
#[must_use]
pub fn span_steps(max: u32) -> SmallVec<[u32; 6]> {
    let max = max.max(1);
    let mut steps: SmallVec<[u32; 6]> = SPAN_STEPS.iter().copied().filter(|&s| s <= max).collect();
    steps.push(1);
    steps.push(max);
    steps.sort_unstable();
    steps.dedup();
    steps
}

/// Snaps a raw span to the nearest step not above `max`.
///
/// Ties go to the smaller step.
#[must_use]
pub fn snap_span(raw: u32, max: u32) -> u32 {
    let max = max.max(1);
    let rounded = raw.clamp(1, max);
    SPAN_STEPS
        .iter()
        .copied()
        .filter(|&step| step <= max)
        .min_by_key(|step| step.abs_diff(rounded))
        .unwrap_or(rounded)
}

/// The next ladder step strictly below `current`, or `current - 1`.
#[must_use]
pub fn smaller_span(current: u32, max: u32) -> u32 {
    if current <= 1 {
        return 1;
    }
    span_steps(max)
        .iter()
        .rev()
        .find(|&&step| step < current)
        .copied()
        .unwrap_or_else(|| (current - 1).max(1))
}

/// Shrinks a rectangle by one ladder step.
///
/// The wider dimension shrinks first; height shrinks once width is at its
/// minimum or the rectangle is taller than wide. A rectangle already at its
/// minimum span is returned at exactly that span. The position is clamped
/// back into bounds.
#[must_use]
pub fn shrink_step(rect: GridRect, min: Span, grid: GridSize) -> GridRect {
    if rect.w <= min.w && rect.h <= min.h {
        return GridRect { w: min.w, h: min.h, ..rect }.clamp_position(grid);
    }

    let mut next = rect;
    if (rect.w >= rect.h && rect.w > min.w) || rect.h <= min.h {
        next.w = smaller_span(rect.w, grid.cols).max(min.w);
    } else if rect.h > min.h {
        next.h = smaller_span(rect.h, grid.rows).max(min.h);
    }

    if next.span() == rect.span() {
        if rect.w > min.w {
            next.w = (rect.w - 1).max(min.w);
        } else if rect.h > min.h {
            next.h = (rect.h - 1).max(min.h);
        }
    }

    next.clamp_position(grid)
}

// ============================================================================
// Retry Combinator
// ============================================================================

/// Why a shrink-and-retry loop gave up. Carries the last state tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryError<S> {
    /// The shrink step could not make progress.
    Stalled(S),

    /// Every attempt was used.
    Exhausted(S),
}

impl<S> RetryError<S> {
    /// The last state tried before giving up.
    pub fn into_last(self) -> S {
        match self {
            Self::Stalled(state) | Self::Exhausted(state) => state,
        }
    }
}

/// Runs `attempt` on `initial`, then alternates `shrink` and `attempt` up to
/// `max_attempts` more times until an attempt succeeds.
///
/// `shrink` returns `None` when it cannot make progress, which ends the loop
/// early with `RetryError::Stalled`.
///
/// # Errors
///
/// Returns the last state tried, tagged with the reason the loop ended.
pub fn retry_with_shrink<S, R>(
    initial: S,
    max_attempts: usize,
    mut attempt: impl FnMut(&S) -> Option<R>,
    mut shrink: impl FnMut(&S) -> Option<S>,
) -> Result<R, RetryError<S>> {
    if let Some(found) = attempt(&initial) {
        return Ok(found);
    }

    let mut state = initial;
    for _ in 0..max_attempts {
        let Some(next) = shrink(&state) else {
            return Err(RetryError::Stalled(state));
        };
        state = next;
        if let Some(found) = attempt(&state) {
            return Ok(found);
        }
    }

    Err(RetryError::Exhausted(state))
}

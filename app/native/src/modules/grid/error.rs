//! Error types for the grid engine.
//!
//! Layout operations never return these to their caller: placement failures
//! are recovered by shrinking or by falling back to the previous layout, and
//! exhausted budgets return the best valid layout so far. The values are
//! still built so the recovery paths can log them. Only the `LayoutEngine`
//! event API returns errors, and only for caller misuse.

use thiserror::Error;

use super::state::{GridSize, Span, TileId};

/// Errors produced by the grid engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A tile of the given span has no free position among the blockers.
    #[error("no free position for tile '{tile}' at span {span}")]
    PlacementNotFound { tile: TileId, span: Span },

    /// A tile could not be placed even at minimum span and was left out.
    #[error("tile '{tile}' does not fit the {grid} board even at minimum span")]
    Unplaceable { tile: TileId, grid: GridSize },

    /// A tile's configuration does not fit the active board.
    #[error("invalid configuration for tile '{tile}': {reason}")]
    InvalidConfiguration { tile: TileId, reason: String },

    /// The minimum spans of all tiles cover more cells than the board has.
    #[error("tiles need at least {required} cells but the {grid} board has {}", .grid.area())]
    BoardTooSmall { grid: GridSize, required: u32 },

    /// A bounded loop hit its ceiling.
    #[error("{stage} stopped after {passes} passes")]
    IterationBudgetExhausted { stage: &'static str, passes: usize },

    /// A layout broke one of the board invariants.
    #[error("layout invariant violated: {0}")]
    InvariantViolated(String),

    /// The event referenced a tile that is not on the board.
    #[error("unknown tile '{0}'")]
    UnknownTile(String),

    /// A drag session is already live; pointer capture is exclusive.
    #[error("a drag on tile '{0}' is already in progress")]
    DragInProgress(TileId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_not_found_display() {
        let err = LayoutError::PlacementNotFound {
            tile: TileId::new("photos"),
            span: Span::new(3, 3),
        };
        let msg = err.to_string();
        assert!(msg.contains("photos"));
        assert!(msg.contains("3×3"));
    }

    #[test]
    fn test_board_too_small_display() {
        let err = LayoutError::BoardTooSmall {
            grid: GridSize::new(2, 2),
            required: 9,
        };
        assert_eq!(err.to_string(), "tiles need at least 9 cells but the 2×2 board has 4");
    }

    #[test]
    fn test_budget_exhausted_display() {
        let err = LayoutError::IterationBudgetExhausted {
            stage: "gap expansion",
            passes: 96,
        };
        assert_eq!(err.to_string(), "gap expansion stopped after 96 passes");
    }

    #[test]
    fn test_drag_in_progress_display() {
        let err = LayoutError::DragInProgress(TileId::new("bio"));
        assert!(err.to_string().contains("already in progress"));
    }
}

//! Occupancy analysis: which board cells are covered by a tile.
//!
//! The occupancy matrix drives gap detection for the expander and the
//! empty-cell report callers use for filler rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::modules::grid::state::{GridCell, GridRect, GridSize, Layout};

/// Row-major matrix of covered cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupancy {
    grid: GridSize,
    cells: Vec<bool>,
}

impl Occupancy {
    /// Empty matrix for a board.
    #[must_use]
    pub fn empty(grid: GridSize) -> Self {
        Self {
            grid,
            cells: vec![false; grid.area() as usize],
        }
    }

    /// Marks every cell covered by some tile of the layout.
    ///
    /// Parts of tiles that fall outside the board are ignored.
    #[must_use]
    pub fn build(layout: &Layout, grid: GridSize) -> Self {
        Self::from_rects(layout.iter().map(|tile| &tile.rect), grid)
    }

    /// Marks every cell covered by one of the rectangles.
    #[must_use]
    pub fn from_rects<'a>(rects: impl IntoIterator<Item = &'a GridRect>, grid: GridSize) -> Self {
        let mut occupancy = Self::empty(grid);
        for rect in rects {
            occupancy.fill(rect);
        }
        occupancy
    }

    /// Marks the cells of a rectangle as covered.
    pub fn fill(&mut self, rect: &GridRect) {
        for y in rect.y..rect.bottom().min(self.grid.rows) {
            for x in rect.x..rect.right().min(self.grid.cols) {
                let index = self.index(x, y);
                self.cells[index] = true;
            }
        }
    }

    /// Check if a cell is covered. Cells outside the board count as covered.
    #[must_use]
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        x >= self.grid.cols || y >= self.grid.rows || self.cells[self.index(x, y)]
    }

    /// Check if every cell of a rectangle is free.
    #[must_use]
    pub fn is_free(&self, rect: &GridRect) -> bool {
        (rect.y..rect.bottom()).all(|y| (rect.x..rect.right()).all(|x| !self.is_occupied(x, y)))
    }

    /// Returns true if at least one cell is uncovered.
    #[must_use]
    pub fn has_gap(&self) -> bool { self.cells.iter().any(|covered| !covered) }

    /// Uncovered cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<GridCell> {
        (0..self.grid.rows)
            .flat_map(|y| (0..self.grid.cols).map(move |x| GridCell { x, y }))
            .filter(|cell| !self.is_occupied(cell.x, cell.y))
            .collect()
    }

    /// The matrix as `rows` vectors of `cols` flags.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.grid.cols as usize).map(<[bool]>::to_vec).collect()
    }

    const fn index(&self, x: u32, y: u32) -> usize { (y * self.grid.cols + x) as usize }
}

/// Cells of the board not covered by any tile, in row-major order.
#[must_use]
pub fn empty_cells(layout: &Layout, grid: GridSize) -> Vec<GridCell> {
    Occupancy::build(layout, grid).empty_cells()
}

// ============================================================================
// Filler Cells
// ============================================================================

/// Decorative tone of an empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FillerTone {
    White,
    Red,
    Black,
}

impl FillerTone {
    /// Deterministic default tone for a cell; mostly white, some red, few black.
    #[must_use]
    pub fn for_cell(cell: GridCell) -> Self {
        let value = (f64::from(cell.x + 1)
            .mul_add(17.23, f64::from(cell.y + 1) * 53.91))
        .sin()
        .abs();
        if value < 0.68 {
            Self::White
        } else if value < 0.85 {
            Self::Red
        } else {
            Self::Black
        }
    }

    /// The next tone in the cycle white → red → black → white.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::White => Self::Red,
            Self::Red => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns the tone name as a static lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Black => "black",
        }
    }
}

/// An empty cell with its decorative tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerCell {
    pub x: u32,
    pub y: u32,
    pub tone: FillerTone,
}

/// Empty cells decorated with their default tone.
#[must_use]
pub fn filler_cells(layout: &Layout, grid: GridSize) -> Vec<FillerCell> {
    empty_cells(layout, grid)
        .into_iter()
        .map(|cell| FillerCell {
            x: cell.x,
            y: cell.y,
            tone: FillerTone::for_cell(cell),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::modules::grid::state::{Tile, TileId, TileKind, TileProfile};

    fn layout(rects: &[(&str, u32, u32, u32, u32)]) -> Layout {
        rects
            .iter()
            .map(|&(id, x, y, w, h)| {
                Tile::new(
                    TileId::new(id),
                    GridRect::new(x, y, w, h),
                    Arc::new(TileProfile::from_kind(TileKind::Content)),
                )
            })
            .collect()
    }

    #[test]
    fn test_build_marks_covered_cells() {
        let occupancy = Occupancy::build(&layout(&[("a", 1, 0, 2, 1)]), GridSize::new(3, 2));
        assert_eq!(occupancy.to_rows(), vec![vec![false, true, true], vec![false, false, false]]);
    }

    #[test]
    fn test_full_board_has_no_gap() {
        let occupancy = Occupancy::build(&layout(&[("a", 0, 0, 2, 2)]), GridSize::new(2, 2));
        assert!(!occupancy.has_gap());
        assert!(occupancy.empty_cells().is_empty());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let cells = empty_cells(&layout(&[("a", 0, 0, 1, 2)]), GridSize::new(2, 2));
        assert_eq!(cells, vec![GridCell { x: 1, y: 0 }, GridCell { x: 1, y: 1 }]);
    }

    #[test]
    fn test_out_of_board_parts_are_ignored() {
        let occupancy = Occupancy::build(&layout(&[("a", 1, 1, 5, 5)]), GridSize::new(2, 2));
        assert_eq!(occupancy.empty_cells().len(), 3);
    }

    #[test]
    fn test_is_free() {
        let occupancy = Occupancy::build(&layout(&[("a", 0, 0, 1, 1)]), GridSize::new(3, 3));
        assert!(occupancy.is_free(&GridRect::new(1, 0, 2, 3)));
        assert!(!occupancy.is_free(&GridRect::new(0, 0, 2, 1)));
        assert!(!occupancy.is_free(&GridRect::new(2, 2, 2, 1)));
    }

    #[test]
    fn test_filler_tone_is_deterministic() {
        let cell = GridCell { x: 3, y: 4 };
        assert_eq!(FillerTone::for_cell(cell), FillerTone::for_cell(cell));
    }

    #[test]
    fn test_filler_tone_cycle() {
        assert_eq!(FillerTone::White.next().next().next(), FillerTone::White);
    }

    #[test]
    fn test_filler_cells_match_empty_cells() {
        let board = layout(&[("a", 0, 0, 1, 1)]);
        let fillers = filler_cells(&board, GridSize::new(2, 1));
        assert_eq!(fillers.len(), 1);
        assert_eq!((fillers[0].x, fillers[0].y), (1, 0));
    }
}

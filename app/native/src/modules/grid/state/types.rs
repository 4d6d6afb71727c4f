//! Core geometry and layout types for the grid engine.
//!
//! Everything here is expressed in grid units:
//! - `GridSize` is the bounded board (`cols` × `rows`)
//! - `GridRect` is a tile rectangle (top-left origin plus spans)
//! - `Tile` binds a stable id and its behavior profile to a rectangle
//! - `Layout` is the ordered list of tiles; the order is the tie-break
//!   order used by the sanitizer and the gap expander

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

use super::behavior::{TileBehavior, TileKind, TileProfile};
use crate::modules::grid::error::LayoutError;

// ============================================================================
// Grid Types
// ============================================================================

/// Dimensions of the board in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    /// Create a new grid size. Zero dimensions are raised to one cell.
    #[must_use]
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols: if cols == 0 { 1 } else { cols },
            rows: if rows == 0 { 1 } else { rows },
        }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(&self) -> u32 { self.cols * self.rows }

    /// Check if a rectangle lies fully inside the board.
    #[must_use]
    pub const fn contains(&self, rect: &GridRect) -> bool {
        rect.w >= 1
            && rect.h >= 1
            && rect.x + rect.w <= self.cols
            && rect.y + rect.h <= self.rows
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.cols, self.rows)
    }
}

/// Viewport mode, each with its own board dimensions and preset.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    /// Wide screens, 8×7 board.
    #[default]
    Desktop,

    /// Medium screens, 6×8 board.
    Tablet,

    /// Narrow screens, 4×10 board.
    Mobile,
}

impl ViewportMode {
    /// Minimum viewport width (px) for desktop mode.
    pub const DESKTOP_MIN_WIDTH: f64 = 1240.0;

    /// Minimum viewport width (px) for tablet mode.
    pub const TABLET_MIN_WIDTH: f64 = 820.0;

    /// All modes, widest first.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Picks the mode for a viewport width in pixels.
    #[must_use]
    pub fn for_width(width: f64) -> Self {
        if width >= Self::DESKTOP_MIN_WIDTH {
            Self::Desktop
        } else if width >= Self::TABLET_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Mobile
        }
    }

    /// Built-in board dimensions for this mode.
    #[must_use]
    pub const fn default_grid(self) -> GridSize {
        match self {
            Self::Desktop => GridSize::new(8, 7),
            Self::Tablet => GridSize::new(6, 8),
            Self::Mobile => GridSize::new(4, 10),
        }
    }

    /// Returns the mode name as a static lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }
}

// ============================================================================
// Geometry Types
// ============================================================================

/// A width/height pair in cells.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Span {
    pub w: u32,
    pub h: u32,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(w: u32, h: u32) -> Self { Self { w, h } }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> u32 { self.w * self.h }

    /// Check if the span fits the board at all.
    #[must_use]
    pub const fn fits(&self, grid: GridSize) -> bool {
        self.w >= 1 && self.h >= 1 && self.w <= grid.cols && self.h <= grid.rows
    }

    /// Clamp both dimensions into `[1, grid bound]`.
    #[must_use]
    pub fn clamp_to(self, grid: GridSize) -> Self {
        Self::new(self.w.clamp(1, grid.cols), self.h.clamp(1, grid.rows))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}×{}", self.w, self.h) }
}

/// A single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

/// A tile rectangle in grid units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self { Self { x, y, w, h } }

    /// Create a rectangle from an origin and a span.
    #[must_use]
    pub const fn from_span(x: u32, y: u32, span: Span) -> Self { Self::new(x, y, span.w, span.h) }

    /// The width/height of this rectangle.
    #[must_use]
    pub const fn span(&self) -> Span { Span::new(self.w, self.h) }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u32 { self.x + self.w }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 { self.y + self.h }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> u32 { self.w * self.h }

    /// Check if this rectangle shares at least one cell with another.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Number of cells shared with another rectangle.
    #[must_use]
    pub fn overlap_area(&self, other: &Self) -> u32 {
        let width = self.right().min(other.right()).saturating_sub(self.x.max(other.x));
        let height = self.bottom().min(other.bottom()).saturating_sub(self.y.max(other.y));
        width * height
    }

    /// Manhattan distance between the two centers, doubled to stay integral.
    #[must_use]
    pub const fn center_distance_x2(&self, other: &Self) -> u32 {
        let ax = 2 * self.x + self.w;
        let ay = 2 * self.y + self.h;
        let bx = 2 * other.x + other.w;
        let by = 2 * other.y + other.h;
        ax.abs_diff(bx) + ay.abs_diff(by)
    }

    /// Manhattan distance from this rectangle's origin to a cell.
    #[must_use]
    pub const fn origin_distance(&self, x: u32, y: u32) -> u32 {
        self.x.abs_diff(x) + self.y.abs_diff(y)
    }

    /// Check if the rectangle covers a cell.
    #[must_use]
    pub const fn contains_cell(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move the origin so the rectangle stays in bounds, keeping the span.
    ///
    /// The span must already fit the board.
    #[must_use]
    pub fn clamp_position(self, grid: GridSize) -> Self {
        Self {
            x: self.x.min(grid.cols.saturating_sub(self.w)),
            y: self.y.min(grid.rows.saturating_sub(self.h)),
            ..self
        }
    }

    /// Clamp the span into `[min, grid bound]`, then the position into bounds.
    #[must_use]
    pub fn clamp_into(self, min: Span, grid: GridSize) -> Self {
        let w = self.w.clamp(min.w.min(grid.cols).max(1), grid.cols);
        let h = self.h.clamp(min.h.min(grid.rows).max(1), grid.rows);
        Self { w, h, ..self }.clamp_position(grid)
    }
}

impl fmt::Display for GridRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}×{}", self.x, self.y, self.w, self.h)
    }
}

// ============================================================================
// Tile Types
// ============================================================================

/// Stable identifier of a tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(Arc<str>);

impl TileId {
    /// Create a new tile id.
    #[must_use]
    pub fn new(id: &str) -> Self { Self(Arc::from(id)) }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Borrow<str> for TileId {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self { Self::new(id) }
}

/// The rendered form of a tile: its id and rectangle, nothing else.
///
/// This is what callers receive and what presets are written in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TileFrame {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl TileFrame {
    /// Create a new frame.
    #[must_use]
    pub fn new(id: &str, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { id: id.to_string(), x, y, w, h }
    }

    /// The rectangle of this frame.
    #[must_use]
    pub const fn rect(&self) -> GridRect { GridRect::new(self.x, self.y, self.w, self.h) }
}

/// A tile placed on the board.
///
/// The behavior profile is attached when the tile is built from a catalog
/// and travels with the tile through every operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub rect: GridRect,
    profile: Arc<TileProfile>,
}

impl Tile {
    /// Create a tile with an explicit profile.
    #[must_use]
    pub const fn new(id: TileId, rect: GridRect, profile: Arc<TileProfile>) -> Self {
        Self { id, rect, profile }
    }

    /// The same tile moved to a new rectangle.
    #[must_use]
    pub fn with_rect(&self, rect: GridRect) -> Self {
        Self {
            id: self.id.clone(),
            rect,
            profile: Arc::clone(&self.profile),
        }
    }

    /// Behavior record of this tile.
    #[must_use]
    pub fn behavior(&self) -> &TileBehavior { &self.profile.behavior }

    /// Kind tag of this tile.
    #[must_use]
    pub fn kind(&self) -> TileKind { self.profile.kind }

    /// Rank in the gap-expansion priority list (lower grows first).
    #[must_use]
    pub fn expand_rank(&self) -> u32 { self.profile.expand_rank }

    /// The rendered frame of this tile.
    #[must_use]
    pub fn frame(&self) -> TileFrame {
        TileFrame::new(self.id.as_str(), self.rect.x, self.rect.y, self.rect.w, self.rect.h)
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.frame().serialize(serializer)
    }
}

// ============================================================================
// Layout Type
// ============================================================================

/// Ordered, immutable snapshot of all tiles on the board.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    tiles: Vec<Tile>,
}

impl Layout {
    /// Create a layout from tiles, keeping their order.
    #[must_use]
    pub const fn new(tiles: Vec<Tile>) -> Self { Self { tiles } }

    /// All tiles in layout order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] { &self.tiles }

    /// Consume the layout, returning its tiles.
    #[must_use]
    pub fn into_tiles(self) -> Vec<Tile> { self.tiles }

    /// Iterate over tiles in layout order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> { self.tiles.iter() }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize { self.tiles.len() }

    /// Returns true if the layout has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.tiles.is_empty() }

    /// Find a tile by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id.as_str() == id)
    }

    /// Position of a tile in layout order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id.as_str() == id)
    }

    /// Tile ids in layout order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> { self.tiles.iter().map(|tile| tile.id.as_str()).collect() }

    /// Rendered frames in layout order.
    #[must_use]
    pub fn frames(&self) -> Vec<TileFrame> { self.tiles.iter().map(Tile::frame).collect() }

    /// Compare only ids and rectangles, in order.
    #[must_use]
    pub fn same_frames(&self, other: &Self) -> bool {
        self.tiles.len() == other.tiles.len()
            && self.tiles.iter().zip(&other.tiles).all(|(a, b)| a.id == b.id && a.rect == b.rect)
    }

    /// Returns the first pair of overlapping tiles, if any.
    #[must_use]
    pub fn find_overlap(&self) -> Option<(&Tile, &Tile)> {
        self.tiles.iter().enumerate().find_map(|(i, a)| {
            self.tiles[i + 1..].iter().find(|b| a.rect.intersects(&b.rect)).map(|b| (a, b))
        })
    }

    /// Checks the layout invariants: bounds, no overlap, minimum spans.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvariantViolated` describing the first violation.
    pub fn validate(&self, grid: GridSize) -> Result<(), LayoutError> {
        for tile in &self.tiles {
            if !grid.contains(&tile.rect) {
                return Err(LayoutError::InvariantViolated(format!(
                    "tile '{}' at {} is outside the {grid} board",
                    tile.id, tile.rect
                )));
            }
            let min = tile.behavior().min_span_for(grid);
            if tile.rect.w < min.w || tile.rect.h < min.h {
                return Err(LayoutError::InvariantViolated(format!(
                    "tile '{}' at {} is smaller than its minimum span {min}",
                    tile.id, tile.rect
                )));
            }
        }

        if let Some((a, b)) = self.find_overlap() {
            return Err(LayoutError::InvariantViolated(format!(
                "tiles '{}' and '{}' overlap",
                a.id, b.id
            )));
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter { self.tiles.iter() }
}

impl FromIterator<Tile> for Layout {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self { tiles: iter.into_iter().collect() }
    }
}

// ============================================================================
// Tests
// ============================================================================

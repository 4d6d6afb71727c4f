//! Tile kinds and their behavior records.
//!
//! Every tile carries a `TileProfile` attached when it is built from the
//! catalog. The profile holds the `TileKind` tag and the `TileBehavior`
//! capability record, so the layout algorithms never look tiles up by id.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use super::types::{GridRect, GridSize, Span};

/// Area a tile grows towards when no explicit target is configured.
pub const DEFAULT_TARGET_AREA: u32 = 8;

/// Rank given to tiles missing from the expand priority list.
pub const UNRANKED: u32 = u32::MAX;

// ============================================================================
// Expansion Direction
// ============================================================================

/// Direction a tile may grow into during gap expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpandDirection {
    Right,
    Down,
    Left,
    Up,
}

impl ExpandDirection {
    /// Growth order used when a tile configures none.
    pub const DEFAULT_ORDER: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    /// The rectangle grown by one cell in this direction.
    ///
    /// Returns `None` when the growth would leave the board.
    #[must_use]
    pub const fn grow(self, rect: GridRect, grid: GridSize) -> Option<GridRect> {
        match self {
            Self::Right if rect.x + rect.w < grid.cols => {
                Some(GridRect::new(rect.x, rect.y, rect.w + 1, rect.h))
            }
            Self::Down if rect.y + rect.h < grid.rows => {
                Some(GridRect::new(rect.x, rect.y, rect.w, rect.h + 1))
            }
            Self::Left if rect.x > 0 => Some(GridRect::new(rect.x - 1, rect.y, rect.w + 1, rect.h)),
            Self::Up if rect.y > 0 => Some(GridRect::new(rect.x, rect.y - 1, rect.w, rect.h + 1)),
            _ => None,
        }
    }

    /// The strip of cells newly covered when growing in this direction.
    #[must_use]
    pub const fn strip(self, rect: GridRect) -> GridRect {
        match self {
            Self::Right => GridRect::new(rect.x + rect.w, rect.y, 1, rect.h),
            Self::Down => GridRect::new(rect.x, rect.y + rect.h, rect.w, 1),
            Self::Left => GridRect::new(rect.x.saturating_sub(1), rect.y, 1, rect.h),
            Self::Up => GridRect::new(rect.x, rect.y.saturating_sub(1), rect.w, 1),
        }
    }
}

// ============================================================================
// Aspect Band
// ============================================================================

/// Allowed width/height ratio range for wide-media tiles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AspectBand {
    pub min: f64,
    pub max: f64,
}

impl AspectBand {
    /// Band used by hero tiles (4:3 up to 16:9).
    pub const HERO: Self = Self::new(4.0 / 3.0, 16.0 / 9.0);

    /// Band used by media tiles: anything up to twice as wide as tall.
    pub const MEDIA: Self = Self::new(0.0, 2.0);

    /// Create a new band. Bounds are reordered if given backwards.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    /// Check if a span's ratio lies inside the band.
    #[must_use]
    pub fn admits(&self, w: u32, h: u32) -> bool {
        if h == 0 {
            return false;
        }
        let ratio = f64::from(w) / f64::from(h);
        ratio >= self.min - f64::EPSILON && ratio <= self.max + f64::EPSILON
    }

    /// Clamp a width into the band for the given height and board width.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamp_width(&self, w: u32, h: u32, cols: u32) -> u32 {
        let height = f64::from(h.max(1));
        let lower = ((height * self.min).ceil() as u32).max(1);
        let upper = ((height * self.max).floor() as u32).max(1);
        let (lower, upper) = (lower.min(upper), lower.max(upper));
        w.clamp(lower.min(cols), upper.min(cols))
    }
}

// ============================================================================
// Tile Kind
// ============================================================================

/// Kind tag of a tile; supplies default behavior.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Primary content (showreel). Picks free space first during shuffle.
    Hero,

    /// Image-backed content, never wider than twice its height.
    Media,

    /// Plain content.
    #[default]
    Content,

    /// Small fixed tiles (site, social). Locked and never auto-expanded.
    Utility,
}

impl TileKind {
    /// Default behavior for this kind.
    #[must_use]
    pub fn default_behavior(self) -> TileBehavior {
        let base = TileBehavior::default();
        match self {
            Self::Hero => TileBehavior {
                aspect_band: Some(AspectBand::HERO),
                ..base
            },
            Self::Media => TileBehavior {
                aspect_band: Some(AspectBand::MEDIA),
                ..base
            },
            Self::Content => base,
            Self::Utility => TileBehavior {
                locked: true,
                non_expanding: true,
                ..base
            },
        }
    }

    /// Returns the kind name as a static lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Media => "media",
            Self::Content => "content",
            Self::Utility => "utility",
        }
    }
}

// ============================================================================
// Tile Behavior
// ============================================================================

/// Capability record of a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileBehavior {
    /// Smallest span the tile may ever take.
    pub min_span: Span,

    /// Size menu tried (in random order) by shuffle. Empty means "keep span".
    pub size_options: SmallVec<[Span; 4]>,

    /// Kept in place (bounds-clamped only) by shuffle and never expanded.
    pub locked: bool,

    /// Never grown by gap expansion.
    pub non_expanding: bool,

    /// Width/height ratio constraint.
    pub aspect_band: Option<AspectBand>,

    /// Growth order for gap expansion.
    pub expansion_directions: SmallVec<[ExpandDirection; 4]>,

    /// Gap expansion stops growing the tile once it covers this many cells.
    pub target_area: u32,

    /// Shuffle visits tiles with a priority before the random remainder,
    /// lowest value first.
    pub shuffle_priority: Option<u8>,
}

impl Default for TileBehavior {
    fn default() -> Self {
        Self {
            min_span: Span::new(1, 1),
            size_options: SmallVec::new(),
            locked: false,
            non_expanding: false,
            aspect_band: None,
            expansion_directions: smallvec![
                ExpandDirection::Right,
                ExpandDirection::Down,
                ExpandDirection::Left,
                ExpandDirection::Up,
            ],
            target_area: DEFAULT_TARGET_AREA,
            shuffle_priority: None,
        }
    }
}

impl TileBehavior {
    /// Minimum span clamped to the board.
    #[must_use]
    pub fn min_span_for(&self, grid: GridSize) -> Span { self.min_span.clamp_to(grid) }

    /// Check if the configured minimum span exceeds the board.
    #[must_use]
    pub const fn min_span_exceeds(&self, grid: GridSize) -> bool {
        self.min_span.w > grid.cols || self.min_span.h > grid.rows
    }

    /// Whether gap expansion may grow this tile at all.
    #[must_use]
    pub const fn can_expand(&self) -> bool { !self.locked && !self.non_expanding }

    /// Check if a span satisfies the aspect band, if any.
    #[must_use]
    pub fn admits_aspect(&self, w: u32, h: u32) -> bool {
        self.aspect_band.is_none_or(|band| band.admits(w, h))
    }

    /// Clamp a rectangle's width into the aspect band, then re-raise it to
    /// the minimum span and keep it in bounds. The minimum span wins over
    /// the band when the two disagree.
    #[must_use]
    pub fn apply_aspect(&self, rect: GridRect, grid: GridSize) -> GridRect {
        let Some(band) = self.aspect_band else {
            return rect;
        };
        let min = self.min_span_for(grid);
        let w = band.clamp_width(rect.w, rect.h, grid.cols).max(min.w).min(grid.cols);
        GridRect { w, ..rect }.clamp_position(grid)
    }

    /// Normalize an arbitrary rectangle: span into `[min, board]`, position
    /// into bounds, then the aspect clamp.
    #[must_use]
    pub fn normalize(&self, rect: GridRect, grid: GridSize) -> GridRect {
        self.apply_aspect(rect.clamp_into(self.min_span_for(grid), grid), grid)
    }

    /// Shuffle size menu filtered to what the board and minimum allow.
    ///
    /// Falls back to `current` when no option is configured.
    #[must_use]
    pub fn shuffle_options(&self, current: Span, grid: GridSize) -> SmallVec<[Span; 4]> {
        let min = self.min_span_for(grid);
        let fits = |size: &Span| size.fits(grid) && size.w >= min.w && size.h >= min.h;
        if self.size_options.is_empty() {
            std::iter::once(current).filter(fits).collect()
        } else {
            self.size_options.iter().copied().filter(fits).collect()
        }
    }
}

/// Kind and behavior of a tile, shared by every snapshot of that tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileProfile {
    pub kind: TileKind,
    pub behavior: TileBehavior,
    pub expand_rank: u32,
}

impl TileProfile {
    /// Profile using the kind's default behavior and no expand rank.
    #[must_use]
    pub fn from_kind(kind: TileKind) -> Self {
        Self {
            kind,
            behavior: kind.default_behavior(),
            expand_rank: UNRANKED,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

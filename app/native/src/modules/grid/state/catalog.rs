//! Tile catalog: the per-tile profiles known to an engine.
//!
//! The catalog is the only place where ids are mapped to behavior. Tiles are
//! built through it once, and from then on carry their profile with them.

use std::collections::HashMap;
use std::sync::Arc;

use super::behavior::{TileBehavior, TileKind, TileProfile, UNRANKED};
use super::types::{GridRect, GridSize, Layout, Tile, TileFrame, TileId};
use crate::modules::grid::error::LayoutError;

/// Profiles keyed by tile id, plus the gap-expansion priority order.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    profiles: HashMap<TileId, Arc<TileProfile>>,
    expand_priority: Vec<TileId>,
}

impl TileCatalog {
    /// Build a catalog from `(id, kind, behavior)` entries and an expand
    /// priority list. Ids missing from the list grow after listed ones.
    #[must_use]
    pub fn new<I>(entries: I, expand_priority: &[TileId]) -> Self
    where
        I: IntoIterator<Item = (TileId, TileKind, TileBehavior)>,
    {
        let profiles = entries
            .into_iter()
            .map(|(id, kind, behavior)| {
                let profile = TileProfile {
                    kind,
                    behavior,
                    expand_rank: rank_in(expand_priority, &id),
                };
                (id, Arc::new(profile))
            })
            .collect();

        Self {
            profiles,
            expand_priority: expand_priority.to_vec(),
        }
    }

    /// Number of configured tiles.
    #[must_use]
    pub fn len(&self) -> usize { self.profiles.len() }

    /// Returns true if no tile is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.profiles.is_empty() }

    /// The expand priority list.
    #[must_use]
    pub fn expand_priority(&self) -> &[TileId] { &self.expand_priority }

    /// Profile for a tile id. Unknown ids get the `Content` defaults.
    #[must_use]
    pub fn profile(&self, id: &str) -> Arc<TileProfile> {
        self.profiles.get(id).map_or_else(
            || {
                Arc::new(TileProfile {
                    expand_rank: self
                        .expand_priority
                        .iter()
                        .position(|ranked| ranked.as_str() == id)
                        .map_or(UNRANKED, rank_from_index),
                    ..TileProfile::from_kind(TileKind::Content)
                })
            },
            Arc::clone,
        )
    }

    /// Build a tile with its profile attached.
    #[must_use]
    pub fn tile(&self, id: &str, rect: GridRect) -> Tile {
        Tile::new(TileId::new(id), rect, self.profile(id))
    }

    /// Build a layout from rendered frames, keeping their order.
    #[must_use]
    pub fn layout_from_frames(&self, frames: &[TileFrame]) -> Layout {
        frames.iter().map(|frame| self.tile(&frame.id, frame.rect())).collect()
    }

    /// Reports configuration defects for a board: tiles whose minimum span
    /// does not fit, and a total minimum area larger than the board.
    ///
    /// The engine clamps and proceeds regardless; these are for flagging.
    #[must_use]
    pub fn validate(&self, grid: GridSize) -> Vec<LayoutError> {
        let mut ids: Vec<&TileId> = self.profiles.keys().collect();
        ids.sort();

        let mut defects: Vec<LayoutError> = ids
            .iter()
            .filter_map(|id| {
                let behavior = &self.profiles[*id].behavior;
                behavior.min_span_exceeds(grid).then(|| LayoutError::InvalidConfiguration {
                    tile: (*id).clone(),
                    reason: format!(
                        "minimum span {} exceeds the {grid} board",
                        behavior.min_span
                    ),
                })
            })
            .collect();

        let min_area: u32 =
            self.profiles.values().map(|p| p.behavior.min_span_for(grid).area()).sum();
        if min_area > grid.area() {
            defects.push(LayoutError::BoardTooSmall {
                grid,
                required: min_area,
            });
        }

        defects
    }
}

/// Rank of an id in the priority list, or `UNRANKED`.
fn rank_in(priority: &[TileId], id: &TileId) -> u32 {
    priority.iter().position(|ranked| ranked == id).map_or(UNRANKED, rank_from_index)
}

fn rank_from_index(index: usize) -> u32 { u32::try_from(index).unwrap_or(UNRANKED) }

// ============================================================================
// Tests
// ============================================================================

//! Built-in tile catalog and presets.
//!
//! Used whenever no configuration file is found, and as the fallback for any
//! section a configuration file leaves out.

use std::collections::BTreeMap;

use super::types::{ModeConfig, TileConfig};
use crate::modules::grid::state::{AspectBand, ExpandDirection, Span, TileFrame, TileKind};

use ExpandDirection::{Down, Left, Right, Up};

/// Tiles grown first by gap expansion, in order.
pub const EXPAND_PRIORITY: [&str; 11] = [
    "photos",
    "current",
    "notes",
    "showreel",
    "films",
    "resources",
    "research",
    "fundraising",
    "newsletter",
    "tags",
    "bio",
];

const fn span(w: u32, h: u32) -> Span { Span::new(w, h) }

fn frames(entries: &[(&str, u32, u32, u32, u32)]) -> Vec<TileFrame> {
    entries.iter().map(|&(id, x, y, w, h)| TileFrame::new(id, x, y, w, h)).collect()
}

/// The desktop board (8×7) and its preset.
#[must_use]
pub fn desktop() -> ModeConfig {
    ModeConfig {
        cols: 8,
        rows: 7,
        preset: frames(&[
            ("bio", 0, 0, 2, 2),
            ("showreel", 2, 0, 3, 2),
            ("tags", 6, 0, 2, 2),
            ("films", 6, 2, 2, 2),
            ("photos", 0, 2, 3, 3),
            ("current", 3, 2, 2, 3),
            ("notes", 5, 4, 2, 2),
            ("research", 3, 5, 2, 1),
            ("resources", 7, 4, 1, 2),
            ("fundraising", 3, 6, 2, 1),
            ("newsletter", 0, 5, 1, 1),
            ("site", 6, 6, 1, 1),
            ("social", 7, 6, 1, 1),
        ]),
    }
}

/// The tablet board (6×8) and its preset.
#[must_use]
pub fn tablet() -> ModeConfig {
    ModeConfig {
        cols: 6,
        rows: 8,
        preset: frames(&[
            ("bio", 0, 0, 2, 2),
            ("showreel", 2, 0, 3, 2),
            ("films", 5, 0, 1, 2),
            ("tags", 4, 2, 2, 1),
            ("photos", 0, 2, 3, 3),
            ("current", 3, 3, 2, 3),
            ("notes", 5, 3, 1, 3),
            ("resources", 0, 5, 2, 2),
            ("research", 2, 5, 2, 2),
            ("fundraising", 4, 6, 2, 1),
            ("newsletter", 0, 7, 2, 1),
            ("site", 4, 7, 1, 1),
            ("social", 5, 7, 1, 1),
        ]),
    }
}

/// The mobile board (4×10) and its preset.
#[must_use]
pub fn mobile() -> ModeConfig {
    ModeConfig {
        cols: 4,
        rows: 10,
        preset: frames(&[
            ("bio", 0, 0, 2, 2),
            ("tags", 2, 0, 2, 1),
            ("showreel", 1, 1, 3, 2),
            ("films", 0, 2, 1, 2),
            ("current", 2, 3, 2, 3),
            ("photos", 0, 4, 2, 3),
            ("notes", 2, 6, 2, 1),
            ("fundraising", 0, 7, 2, 1),
            ("resources", 2, 7, 2, 1),
            ("research", 0, 8, 2, 1),
            ("newsletter", 0, 9, 2, 1),
            ("site", 2, 9, 1, 1),
            ("social", 3, 9, 1, 1),
        ]),
    }
}

/// The built-in tile catalog.
#[must_use]
pub fn tiles() -> BTreeMap<String, TileConfig> {
    let media = |target_area: u32, size_options: Vec<Span>| TileConfig {
        kind: TileKind::Media,
        target_area: Some(target_area),
        size_options: Some(size_options),
        ..TileConfig::default()
    };

    let entries = [
        ("bio", TileConfig {
            min_span: Some(span(2, 2)),
            target_area: Some(4),
            size_options: Some(vec![span(2, 2), span(3, 2)]),
            ..TileConfig::default()
        }),
        ("showreel", TileConfig {
            kind: TileKind::Hero,
            min_span: Some(span(3, 2)),
            target_area: Some(8),
            size_options: Some(vec![span(4, 3), span(3, 2)]),
            aspect_band: Some(AspectBand::HERO),
            ..TileConfig::default()
        }),
        ("photos", TileConfig {
            expansion_directions: Some(vec![Right, Down, Left, Up]),
            shuffle_priority: Some(0),
            ..media(12, vec![span(4, 3), span(3, 3), span(4, 2), span(3, 2), span(2, 3)])
        }),
        ("current", TileConfig {
            min_span: Some(span(2, 2)),
            expansion_directions: Some(vec![Down, Up, Right, Left]),
            shuffle_priority: Some(1),
            ..media(8, vec![span(2, 3), span(3, 2), span(2, 2)])
        }),
        ("films", media(4, vec![span(2, 1), span(1, 2), span(1, 1)])),
        ("resources", media(4, vec![span(2, 1), span(1, 2), span(1, 1)])),
        ("research", media(4, vec![span(2, 2), span(2, 1), span(1, 2)])),
        ("fundraising", media(3, vec![span(2, 1), span(2, 2), span(1, 1)])),
        ("notes", TileConfig {
            min_span: Some(span(2, 1)),
            target_area: Some(4),
            size_options: Some(vec![span(1, 3), span(2, 2), span(1, 2)]),
            expansion_directions: Some(vec![Down, Up, Right, Left]),
            ..TileConfig::default()
        }),
        ("tags", TileConfig {
            min_span: Some(span(2, 1)),
            target_area: Some(2),
            size_options: Some(vec![span(2, 1), span(1, 1)]),
            expansion_directions: Some(vec![Left, Down, Up, Right]),
            ..TileConfig::default()
        }),
        ("newsletter", TileConfig {
            locked: Some(true),
            non_expanding: Some(true),
            target_area: Some(2),
            expansion_directions: Some(vec![Up, Down, Right, Left]),
            ..TileConfig::default()
        }),
        ("site", TileConfig {
            kind: TileKind::Utility,
            ..TileConfig::default()
        }),
        ("social", TileConfig {
            kind: TileKind::Utility,
            ..TileConfig::default()
        }),
    ];

    entries.into_iter().map(|(id, tile)| (id.to_string(), tile)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::grid::state::GridSize;

    fn assert_preset_fits(mode: &ModeConfig) {
        let grid = GridSize::new(mode.cols, mode.rows);
        for frame in &mode.preset {
            assert!(grid.contains(&frame.rect()), "{} leaves the board", frame.id);
        }
    }

    #[test]
    fn test_presets_fit_their_boards() {
        assert_preset_fits(&desktop());
        assert_preset_fits(&tablet());
        assert_preset_fits(&mobile());
    }

    #[test]
    fn test_presets_cover_the_catalog() {
        let catalog = tiles();
        for mode in [desktop(), tablet(), mobile()] {
            assert_eq!(mode.preset.len(), catalog.len());
            assert!(mode.preset.iter().all(|frame| catalog.contains_key(&frame.id)));
        }
    }

    #[test]
    fn test_expand_priority_names_known_tiles() {
        let catalog = tiles();
        assert!(EXPAND_PRIORITY.iter().all(|id| catalog.contains_key(*id)));
    }

    #[test]
    fn test_utility_tiles_are_locked() {
        let catalog = tiles();
        for id in ["site", "social", "newsletter"] {
            let behavior = catalog[id].behavior();
            assert!(behavior.locked, "{id}");
            assert!(!behavior.can_expand(), "{id}");
        }
    }
}

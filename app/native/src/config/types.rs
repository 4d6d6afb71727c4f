//! Configuration types for Bento.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! Every section is optional; missing sections fall back to the built-in
//! catalog and presets.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::defaults;
use crate::modules::grid::events::DEFAULT_GAP_PX;
use crate::modules::grid::state::{
    AspectBand, ExpandDirection, GridSize, Span, TileBehavior, TileCatalog, TileFrame, TileId,
    TileKind, ViewportMode,
};

// ============================================================================
// Board Configuration
// ============================================================================

/// Board dimensions and preset layout for one viewport mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    /// Number of columns.
    pub cols: u32,

    /// Number of rows.
    pub rows: u32,

    /// Starting layout for the mode, finalized before use.
    #[serde(default)]
    pub preset: Vec<TileFrame>,
}

impl ModeConfig {
    /// Board dimensions for this mode.
    #[must_use]
    pub const fn grid(&self) -> GridSize { GridSize::new(self.cols, self.rows) }
}

// ============================================================================
// Tile Configuration
// ============================================================================

/// Per-tile configuration.
///
/// Every field except `kind` is optional; unset fields take the default
/// behavior of the tile's kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TileConfig {
    /// Tile kind: "hero", "media", "content" or "utility".
    /// Default: "content"
    pub kind: TileKind,

    /// Smallest span the tile may take.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_span: Option<Span>,

    /// Spans tried, in random order, by shuffle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_options: Option<Vec<Span>>,

    /// Keep the tile in place during shuffle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    /// Never grow the tile into empty cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_expanding: Option<bool>,

    /// Allowed width/height ratio range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_band: Option<AspectBand>,

    /// Growth order for gap expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion_directions: Option<Vec<ExpandDirection>>,

    /// Gap expansion stops growing the tile at this many cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_area: Option<u32>,

    /// Shuffle places tiles with a priority first, lowest value first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_priority: Option<u8>,
}

impl TileConfig {
    /// Resolves the configured overrides on top of the kind's defaults.
    #[must_use]
    pub fn behavior(&self) -> TileBehavior {
        let base = self.kind.default_behavior();
        TileBehavior {
            min_span: self.min_span.unwrap_or(base.min_span),
            size_options: self
                .size_options
                .as_ref()
                .map_or(base.size_options, |spans| spans.iter().copied().collect()),
            locked: self.locked.unwrap_or(base.locked),
            non_expanding: self.non_expanding.unwrap_or(base.non_expanding),
            aspect_band: self.aspect_band.or(base.aspect_band),
            expansion_directions: match &self.expansion_directions {
                Some(order) if !order.is_empty() => order.iter().copied().collect(),
                Some(_) => SmallVec::from_slice(&ExpandDirection::DEFAULT_ORDER),
                None => base.expansion_directions,
            },
            target_area: self.target_area.unwrap_or(base.target_area),
            shuffle_priority: self.shuffle_priority.or(base.shuffle_priority),
        }
    }
}

/// Shuffle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ShuffleConfig {
    /// Seed used when none is given on the command line.
    /// Default: random per run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure for Bento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BentoConfig {
    /// Wide screen board.
    pub desktop: ModeConfig,

    /// Medium screen board.
    pub tablet: ModeConfig,

    /// Narrow screen board.
    pub mobile: ModeConfig,

    /// Tile catalog keyed by tile id.
    pub tiles: BTreeMap<String, TileConfig>,

    /// Tiles grown first by gap expansion, in order.
    pub expand_priority: Vec<String>,

    /// Shuffle settings.
    pub shuffle: ShuffleConfig,

    /// Gap between cells in pixels.
    /// Default: 10
    pub cell_gap: f64,
}

impl Default for BentoConfig {
    fn default() -> Self {
        Self {
            desktop: defaults::desktop(),
            tablet: defaults::tablet(),
            mobile: defaults::mobile(),
            tiles: defaults::tiles(),
            expand_priority: defaults::EXPAND_PRIORITY.iter().map(ToString::to_string).collect(),
            shuffle: ShuffleConfig::default(),
            cell_gap: DEFAULT_GAP_PX,
        }
    }
}

impl BentoConfig {
    /// Board and preset for a viewport mode.
    #[must_use]
    pub const fn mode(&self, mode: ViewportMode) -> &ModeConfig {
        match mode {
            ViewportMode::Desktop => &self.desktop,
            ViewportMode::Tablet => &self.tablet,
            ViewportMode::Mobile => &self.mobile,
        }
    }

    /// Builds the tile catalog from the `tiles` and `expandPriority` sections.
    #[must_use]
    pub fn catalog(&self) -> TileCatalog {
        let priority: Vec<TileId> =
            self.expand_priority.iter().map(|id| TileId::new(id)).collect();
        let entries = self
            .tiles
            .iter()
            .map(|(id, tile)| (TileId::new(id), tile.kind, tile.behavior()));
        TileCatalog::new(entries, &priority)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error("No configuration file found")]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Supported configuration file names in order of priority.
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Dotfile names checked in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".bento.jsonc", ".bento.json"];

/// Returns the list of paths where configuration files are searched.
///
/// The search order is:
/// 1. `$XDG_CONFIG_HOME/bento/` if set
/// 2. `~/.config/bento/`
/// 3. The platform configuration directory (`dirs::config_dir()/bento/`)
/// 4. `~/.bento.jsonc` and `~/.bento.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    fn push_dir(dir: &Path, paths: &mut Vec<PathBuf>) {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_dir(&PathBuf::from(xdg_config).join("bento"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(&home.join(".config").join("bento"), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(&config_dir.join("bento"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from the first existing search path.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(BentoConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .ok_or(ConfigError::NotFound)
        .and_then(|path| load_config_from_path(&path))
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, otherwise the
/// same errors as `load_config`.
pub fn load_config_from_path(path: &Path) -> Result<(BentoConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: BentoConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_has_builtin_catalog() {
        let config = BentoConfig::default();
        assert_eq!(config.tiles.len(), 13);
        assert_eq!(config.desktop.grid(), GridSize::new(8, 7));
        assert_eq!(config.mobile.grid(), GridSize::new(4, 10));
        assert!((config.cell_gap - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_selects_board() {
        let config = BentoConfig::default();
        assert_eq!(config.mode(ViewportMode::Tablet).grid(), GridSize::new(6, 8));
    }

    #[test]
    fn test_tile_config_overrides_kind_defaults() {
        let tile: TileConfig = serde_json::from_str(
            r#"{ "kind": "utility", "locked": false, "minSpan": { "w": 2, "h": 1 } }"#,
        )
        .unwrap();
        let behavior = tile.behavior();
        assert!(!behavior.locked);
        assert!(behavior.non_expanding);
        assert_eq!(behavior.min_span, Span::new(2, 1));
    }

    #[test]
    fn test_tile_config_defaults_to_content() {
        let tile: TileConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(tile.kind, TileKind::Content);
        assert_eq!(tile.behavior(), TileKind::Content.default_behavior());
    }

    #[test]
    fn test_empty_directions_use_default_order() {
        let tile = TileConfig {
            expansion_directions: Some(Vec::new()),
            ..TileConfig::default()
        };
        let behavior = tile.behavior();
        assert_eq!(behavior.expansion_directions.as_slice(), &ExpandDirection::DEFAULT_ORDER);
    }

    #[test]
    fn test_catalog_ranks_expand_priority() {
        let catalog = BentoConfig::default().catalog();
        assert_eq!(catalog.len(), 13);
        assert!(catalog.profile("photos").expand_rank < catalog.profile("bio").expand_rank);
        assert_eq!(catalog.profile("showreel").kind, TileKind::Hero);
    }

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let file = write_config(
            r#"{
                // narrower gaps
                "cellGap": 6,
                /* custom seed */
                "shuffle": { "seed": 7 }
            }"#,
        );
        let (config, path) = load_config_from_path(file.path()).unwrap();
        assert_eq!(path, file.path());
        assert!((config.cell_gap - 6.0).abs() < f64::EPSILON);
        assert_eq!(config.shuffle.seed, Some(7));
        // untouched sections keep the built-in values
        assert_eq!(config.tiles.len(), 13);
    }

    #[test]
    fn test_load_config_from_path_reports_parse_errors() {
        let file = write_config("{ \"cellGap\": }");
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("missing.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_mode_override_replaces_preset() {
        let file = write_config(
            r#"{ "mobile": { "cols": 2, "rows": 3, "preset": [{ "id": "bio", "x": 0, "y": 0, "w": 2, "h": 2 }] } }"#,
        );
        let (config, _) = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.mobile.grid(), GridSize::new(2, 3));
        assert_eq!(config.mobile.preset.len(), 1);
        assert_eq!(config.desktop, defaults::desktop());
    }

    #[test]
    fn test_config_paths_are_not_empty() {
        assert!(config_paths().iter().any(|path| path.ends_with("config.jsonc")));
    }

    #[test]
    fn test_config_error_display() {
        assert!(ConfigError::NotFound.to_string().contains("No configuration file found"));
    }
}

//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
///
/// Every commented value matches the built-in default, so uncommenting a
/// section unchanged leaves behavior as it was.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Bento Configuration File
// =========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
//
// Run `bento schema` for the full JSON Schema.

{
  // ============================================================================
  // Boards
  // ============================================================================
  // One board per viewport mode. A mode you override must list its whole
  // preset; tiles missing from the preset are not shown in that mode.
  // "desktop": {
  //   "cols": 8,
  //   "rows": 7,
  //   "preset": [
  //     { "id": "bio", "x": 0, "y": 0, "w": 2, "h": 2 },
  //     { "id": "showreel", "x": 2, "y": 0, "w": 3, "h": 2 },
  //     { "id": "tags", "x": 6, "y": 0, "w": 2, "h": 2 },
  //     { "id": "films", "x": 6, "y": 2, "w": 2, "h": 2 },
  //     { "id": "photos", "x": 0, "y": 2, "w": 3, "h": 3 },
  //     { "id": "current", "x": 3, "y": 2, "w": 2, "h": 3 },
  //     { "id": "notes", "x": 5, "y": 4, "w": 2, "h": 2 },
  //     { "id": "research", "x": 3, "y": 5, "w": 2, "h": 1 },
  //     { "id": "resources", "x": 7, "y": 4, "w": 1, "h": 2 },
  //     { "id": "fundraising", "x": 3, "y": 6, "w": 2, "h": 1 },
  //     { "id": "newsletter", "x": 0, "y": 5, "w": 1, "h": 1 },
  //     { "id": "site", "x": 6, "y": 6, "w": 1, "h": 1 },
  //     { "id": "social", "x": 7, "y": 6, "w": 1, "h": 1 }
  //   ]
  // },
  // "tablet": { "cols": 6, "rows": 8, "preset": [ /* ... */ ] },
  // "mobile": { "cols": 4, "rows": 10, "preset": [ /* ... */ ] },

  // ============================================================================
  // Tiles
  // ============================================================================
  // Keyed by tile id. Replacing this section replaces the whole catalog.
  //
  // kind:                "hero", "media", "content" or "utility"
  //                      hero  -> aspect ratio kept between 4:3 and 16:9
  //                      media -> never wider than twice its height
  //                      utility -> locked and never expanded
  // minSpan:             smallest size, e.g. { "w": 2, "h": 1 }
  // sizeOptions:         sizes tried by shuffle, e.g. [{ "w": 2, "h": 1 }]
  // locked:              keep in place during shuffle
  // nonExpanding:        never grow into empty cells
  // aspectBand:          { "min": 1.0, "max": 2.0 } width / height range
  // expansionDirections: growth order, any of "right", "down", "left", "up"
  // targetArea:          stop growing at this many cells (default: 8)
  // shufflePriority:     placed first by shuffle, lowest value first
  //
  // "tiles": {
  //   "showreel": {
  //     "kind": "hero",
  //     "minSpan": { "w": 3, "h": 2 },
  //     "sizeOptions": [{ "w": 4, "h": 3 }, { "w": 3, "h": 2 }],
  //     "targetArea": 8
  //   },
  //   "photos": {
  //     "kind": "media",
  //     "targetArea": 12,
  //     "shufflePriority": 0
  //   },
  //   "site": { "kind": "utility" }
  // },

  // ============================================================================
  // Gap Expansion
  // ============================================================================
  // Tiles grown first when filling empty cells, in order.
  // "expandPriority": [
  //   "photos", "current", "notes", "showreel", "films", "resources",
  //   "research", "fundraising", "newsletter", "tags", "bio"
  // ],

  // ============================================================================
  // Shuffle
  // ============================================================================
  // "shuffle": {
  //   // Seed used when `bento layout shuffle` runs without --seed
  //   "seed": 42
  // },

  // ============================================================================
  // Rendering
  // ============================================================================
  // Gap between cells in pixels, used to turn pointer offsets into cells
  // "cellGap": 10
}
"##
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}

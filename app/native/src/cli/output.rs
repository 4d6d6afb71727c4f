//! CLI output formatting utilities.
//!
//! This module provides utilities for formatting CLI output including:
//! - JSON syntax highlighting
//! - Board rendering with one letter per tile
//! - Tile tables

use std::fmt::Write as _;

use colored::{Color, Colorize};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::modules::grid::{FillerTone, GridSize, Layout, filler_cells};

/// Tile label alphabet, in layout order.
const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Label colors, cycled by tile index.
const LABEL_COLORS: [Color; 6] =
    [Color::Cyan, Color::Green, Color::Yellow, Color::Magenta, Color::Blue, Color::BrightRed];

// ============================================================================
// JSON
// ============================================================================

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (default)
pub fn print_highlighted_json(value: &serde_json::Value) {
    let mut out = String::new();
    write_json(&mut out, value, 0);
    println!("{out}");
}

fn write_json(out: &mut String, value: &serde_json::Value, depth: usize) {
    use serde_json::Value;

    let indent = "  ".repeat(depth + 1);
    let closing = "  ".repeat(depth);
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(flag) => out.push_str(&flag.to_string().magenta().to_string()),
        Value::Number(number) => out.push_str(&number.to_string().yellow().to_string()),
        Value::String(text) => out.push_str(&quoted(text).green().to_string()),
        Value::Array(items) if items.is_empty() => out.push_str(&"[]".white().bold().to_string()),
        Value::Object(map) if map.is_empty() => out.push_str(&"{}".white().bold().to_string()),
        Value::Array(items) => {
            out.push_str(&"[".white().bold().to_string());
            for (index, item) in items.iter().enumerate() {
                out.push_str(if index == 0 { "\n" } else { ",\n" });
                out.push_str(&indent);
                write_json(out, item, depth + 1);
            }
            let _ = write!(out, "\n{closing}{}", "]".white().bold());
        }
        Value::Object(map) => {
            out.push_str(&"{".white().bold().to_string());
            for (index, (key, item)) in map.iter().enumerate() {
                out.push_str(if index == 0 { "\n" } else { ",\n" });
                let _ = write!(out, "{indent}{}{} ", quoted(key).cyan(), ":".white());
                write_json(out, item, depth + 1);
            }
            let _ = write!(out, "\n{closing}{}", "}".white().bold());
        }
    }
}

fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

// ============================================================================
// Board
// ============================================================================

/// One cell of a rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCell {
    /// Covered by the tile at this layout index.
    Tile(usize),
    /// Uncovered, shown as decorative filler.
    Filler(FillerTone),
}

/// Letter used for the tile at `index`.
#[must_use]
pub fn tile_label(index: usize) -> char { LABELS.get(index).map_or('?', |&byte| char::from(byte)) }

/// The board as rows of cells.
#[must_use]
pub fn board_cells(layout: &Layout, grid: GridSize) -> Vec<Vec<BoardCell>> {
    let mut rows =
        vec![vec![BoardCell::Filler(FillerTone::White); grid.cols as usize]; grid.rows as usize];

    for filler in filler_cells(layout, grid) {
        rows[filler.y as usize][filler.x as usize] = BoardCell::Filler(filler.tone);
    }

    for (index, tile) in layout.iter().enumerate() {
        let rect = tile.rect;
        for y in rect.y..rect.bottom().min(grid.rows) {
            for x in rect.x..rect.right().min(grid.cols) {
                rows[y as usize][x as usize] = BoardCell::Tile(index);
            }
        }
    }

    rows
}

const fn filler_glyph(tone: FillerTone) -> char {
    match tone {
        FillerTone::White => '·',
        FillerTone::Red => '+',
        FillerTone::Black => '#',
    }
}

fn cell_glyph(cell: BoardCell) -> String {
    match cell {
        BoardCell::Tile(index) => tile_label(index).to_string(),
        BoardCell::Filler(tone) => filler_glyph(tone).to_string(),
    }
}

/// Prints the board with colored tile letters.
pub fn print_board(layout: &Layout, grid: GridSize) {
    for row in board_cells(layout, grid) {
        let line: Vec<String> = row
            .into_iter()
            .map(|cell| match cell {
                BoardCell::Tile(index) => cell_glyph(cell)
                    .color(LABEL_COLORS[index % LABEL_COLORS.len()])
                    .bold()
                    .to_string(),
                BoardCell::Filler(FillerTone::Red) => cell_glyph(cell).red().dimmed().to_string(),
                BoardCell::Filler(_) => cell_glyph(cell).dimmed().to_string(),
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Tabled)]
struct TileRow {
    #[tabled(rename = "")]
    label: char,
    #[tabled(rename = "Tile")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Locked")]
    locked: String,
}

/// Renders the tile table for a layout.
#[must_use]
pub fn tile_table(layout: &Layout) -> String {
    let rows: Vec<TileRow> = layout
        .iter()
        .enumerate()
        .map(|(index, tile)| TileRow {
            label: tile_label(index),
            id: truncate(tile.id.as_str(), 20),
            kind: tile.kind().as_str(),
            position: format!("{}, {}", tile.rect.x, tile.rect.y),
            size: tile.rect.span().to_string(),
            locked: format_bool(tile.behavior().locked),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string()
}

/// Truncates a string to a maximum number of characters, adding ellipsis if needed.
///
/// This function correctly handles multi-byte UTF-8 characters by counting
/// characters rather than bytes.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        let truncate_at = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
        format!("{}…", &s[..truncate_at])
    }
}

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

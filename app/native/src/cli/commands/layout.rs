//! Layout CLI commands.
//!
//! Each command builds a `LayoutEngine` from the loaded configuration,
//! applies one operation, and prints the resulting board. Moves and resizes
//! are replayed as a full drag (begin, one pointer move, pointer up) so they
//! go through the same path as interactive edits.

use clap::Subcommand;
use colored::Colorize;
use rand::Rng;
use serde_json::json;

use super::types::{BoardArgs, CliEdge};
use crate::cli::output;
use crate::config::{self, BentoConfig};
use crate::error::BentoError;
use crate::modules::grid::{LayoutEngine, PointerPosition, ResizeEdge};

/// Layout subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum LayoutCommands {
    /// Show the finalized preset for a mode.
    #[command(after_long_help = r#"Examples:
  bento layout show                 # Desktop board
  bento layout show --mode mobile   # Mobile board
  bento layout show --width 900     # Mode picked from a viewport width
  bento layout show --json          # Output as JSON"#)]
    Show {
        #[command(flatten)]
        board: BoardArgs,
    },

    /// Shuffle the board.
    ///
    /// Locked tiles stay in place; every other tile gets a random size from
    /// its size options at a random free position.
    #[command(after_long_help = r#"Examples:
  bento layout shuffle              # Random seed
  bento layout shuffle --seed 42    # Reproducible shuffle"#)]
    Shuffle {
        /// Seed for the shuffle. Defaults to `shuffle.seed` from the
        /// configuration, or a random seed.
        #[arg(long, short)]
        seed: Option<u64>,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// Move a tile by whole cells, pushing aside the tiles it lands on.
    #[command(after_long_help = r#"Examples:
  bento layout move showreel 3 0     # Three columns to the right
  bento layout move photos -1 2      # One column left, two rows down"#)]
    Move {
        /// Tile id.
        id: String,

        /// Columns to move by (negative moves left).
        #[arg(allow_negative_numbers = true)]
        cols: i32,

        /// Rows to move by (negative moves up).
        #[arg(allow_negative_numbers = true)]
        rows: i32,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// Resize a tile by dragging one of its edges or corners.
    #[command(after_long_help = r#"Examples:
  bento layout resize photos e 1 0    # One column wider
  bento layout resize bio sw -1 1     # Grow down and to the left"#)]
    Resize {
        /// Tile id.
        id: String,

        /// Edge or corner to drag.
        #[arg(value_enum)]
        edge: CliEdge,

        /// Columns to drag by.
        #[arg(allow_negative_numbers = true)]
        cols: i32,

        /// Rows to drag by.
        #[arg(allow_negative_numbers = true)]
        rows: i32,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// List the cells no tile covers.
    Empty {
        #[command(flatten)]
        board: BoardArgs,
    },
}

/// Execute layout subcommands.
///
/// # Errors
///
/// Returns an error if the engine rejects the operation.
pub fn execute(cmd: &LayoutCommands) -> Result<(), BentoError> {
    let config = config::get_config();

    match cmd {
        LayoutCommands::Show { board } => {
            let engine = LayoutEngine::from_config(config, board.viewport_mode());
            print_engine(&engine, board.json);
            Ok(())
        }
        LayoutCommands::Shuffle { seed, board } => {
            let seed = resolve_seed(*seed, config);
            let mut engine = LayoutEngine::from_config(config, board.viewport_mode());
            engine.request_shuffle(seed)?;
            if !board.json {
                println!("{}", format!("Seed: {seed}").dimmed());
            }
            print_engine(&engine, board.json);
            Ok(())
        }
        LayoutCommands::Move { id, cols, rows, board } => {
            let mut engine = LayoutEngine::from_config(config, board.viewport_mode());
            replay_drag(&mut engine, id, None, *cols, *rows)?;
            print_engine(&engine, board.json);
            Ok(())
        }
        LayoutCommands::Resize { id, edge, cols, rows, board } => {
            let mut engine = LayoutEngine::from_config(config, board.viewport_mode());
            replay_drag(&mut engine, id, Some((*edge).into()), *cols, *rows)?;
            print_engine(&engine, board.json);
            Ok(())
        }
        LayoutCommands::Empty { board } => {
            let engine = LayoutEngine::from_config(config, board.viewport_mode());
            print_empty_cells(&engine, board.json);
            Ok(())
        }
    }
}

/// Seed from the command line, then the configuration, then the thread RNG.
fn resolve_seed(seed: Option<u64>, config: &BentoConfig) -> u64 {
    seed.or(config.shuffle.seed).unwrap_or_else(|| rand::rng().random())
}

/// Drives a move (`edge` is `None`) or resize through the engine's drag API.
///
/// # Errors
///
/// Returns an error if the tile is not on the board.
pub fn replay_drag(
    engine: &mut LayoutEngine,
    id: &str,
    edge: Option<ResizeEdge>,
    cols: i32,
    rows: i32,
) -> Result<(), BentoError> {
    let metrics = engine.metrics();
    let start = PointerPosition::default();
    let end = PointerPosition::new(
        f64::from(cols) * metrics.step_x(),
        f64::from(rows) * metrics.step_y(),
    );

    let token = match edge {
        Some(edge) => engine.begin_resize(id, edge, start)?,
        None => engine.begin_move(id, start)?,
    };
    engine.pointer_move(token, end);
    engine.pointer_up(token);
    Ok(())
}

fn print_engine(engine: &LayoutEngine, as_json: bool) {
    let grid = engine.grid();
    if as_json {
        output::print_highlighted_json(&json!({
            "mode": engine.mode(),
            "cols": grid.cols,
            "rows": grid.rows,
            "tiles": engine.layout(),
            "emptyCells": engine.empty_cells(),
        }));
        return;
    }

    println!("{}", format!("{} board ({grid})", engine.mode().as_str()).bold());
    output::print_board(engine.layout(), grid);
    println!("{}", output::tile_table(engine.layout()));

    let empty = engine.empty_cells().len();
    if empty > 0 {
        println!("{}", format!("{empty} empty cell(s)").dimmed());
    }
}

fn print_empty_cells(engine: &LayoutEngine, as_json: bool) {
    let fillers = engine.filler_cells();
    if as_json {
        let cells: Vec<_> = fillers
            .iter()
            .map(|cell| json!({ "x": cell.x, "y": cell.y, "tone": cell.tone.as_str() }))
            .collect();
        output::print_highlighted_json(&serde_json::Value::Array(cells));
        return;
    }

    if fillers.is_empty() {
        println!("{}", "Every cell is covered.".dimmed());
        return;
    }

    println!("{}", format!("Empty cells ({})", fillers.len()).bold());
    for cell in fillers {
        println!("  {}, {}  {}", cell.x, cell.y, cell.tone.as_str().dimmed());
    }
}

//! Shared CLI types.
//!
//! Clap-facing mirrors of engine enums, plus the board selection flags that
//! every layout command accepts.

use clap::Args;

use crate::modules::grid::{ResizeEdge, ViewportMode};

/// Viewport mode (CLI representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliMode {
    /// 8×7 board.
    Desktop,
    /// 6×8 board.
    Tablet,
    /// 4×10 board.
    Mobile,
}

impl From<CliMode> for ViewportMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Desktop => Self::Desktop,
            CliMode::Tablet => Self::Tablet,
            CliMode::Mobile => Self::Mobile,
        }
    }
}

/// Resize handle (CLI representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliEdge {
    /// Top edge.
    N,
    /// Right edge.
    E,
    /// Bottom edge.
    S,
    /// Left edge.
    W,
    /// Top-right corner.
    Ne,
    /// Top-left corner.
    Nw,
    /// Bottom-right corner.
    Se,
    /// Bottom-left corner.
    Sw,
}

impl From<CliEdge> for ResizeEdge {
    fn from(edge: CliEdge) -> Self {
        match edge {
            CliEdge::N => Self::N,
            CliEdge::E => Self::E,
            CliEdge::S => Self::S,
            CliEdge::W => Self::W,
            CliEdge::Ne => Self::Ne,
            CliEdge::Nw => Self::Nw,
            CliEdge::Se => Self::Se,
            CliEdge::Sw => Self::Sw,
        }
    }
}

/// Board selection and output flags shared by layout commands.
#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Viewport mode to lay out.
    #[arg(long, short, value_enum, conflicts_with = "width")]
    pub mode: Option<CliMode>,

    /// Pick the mode from a viewport width in pixels.
    #[arg(long, value_name = "PX")]
    pub width: Option<f64>,

    /// Output in JSON format instead of a board and table.
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl BoardArgs {
    /// The selected mode. Defaults to desktop.
    #[must_use]
    pub fn viewport_mode(&self) -> ViewportMode {
        match (self.mode, self.width) {
            (Some(mode), _) => mode.into(),
            (None, Some(width)) => ViewportMode::for_width(width),
            (None, None) => ViewportMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_mode_converts() {
        assert_eq!(ViewportMode::from(CliMode::Mobile), ViewportMode::Mobile);
    }

    #[test]
    fn test_cli_edge_converts() {
        assert_eq!(ResizeEdge::from(CliEdge::Sw), ResizeEdge::Sw);
    }

    #[test]
    fn test_board_args_default_to_desktop() {
        assert_eq!(BoardArgs::default().viewport_mode(), ViewportMode::Desktop);
    }

    #[test]
    fn test_board_args_pick_mode_from_width() {
        let args = BoardArgs {
            width: Some(375.0),
            ..BoardArgs::default()
        };
        assert_eq!(args.viewport_mode(), ViewportMode::Mobile);
    }
}

//! Pointer input for interactive edits.
//!
//! - [`drag_state`] - Drag sessions, tokens and pixel-to-cell conversion

pub mod drag_state;

pub use drag_state::{
    CellMetrics, DEFAULT_GAP_PX, DragOperation, DragSession, DragToken, MIN_CELL_PX,
    PointerPosition,
};

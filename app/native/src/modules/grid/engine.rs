//! The layout engine: the live board and its drag session.
//!
//! `LayoutEngine` is a plain value owned by the caller. It holds the active
//! mode, the tile catalog, the committed layout and at most one drag
//! session, and maps input events onto the pure layout operations. Nothing
//! is shared or global; two engines never see each other.

use super::error::LayoutError;
use super::events::{CellMetrics, DragOperation, DragSession, DragToken, PointerPosition};
use super::layout::{
    FillerCell, ResizeEdge, empty_cells, filler_cells, finalize, resolve_mutation, sanitize,
    shuffle,
};
use super::state::{GridCell, GridSize, Layout, TileCatalog, TileFrame, ViewportMode};
use crate::config::BentoConfig;

/// Live board state driven by pointer events.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    mode: ViewportMode,
    grid: GridSize,
    catalog: TileCatalog,
    layout: Layout,
    metrics: CellMetrics,
    session: Option<DragSession>,
    next_token: u64,
}

impl LayoutEngine {
    /// Creates an engine for a board and finalizes the preset onto it.
    ///
    /// Configuration defects for the board are logged; the engine still
    /// starts with whatever fits.
    #[must_use]
    pub fn new(
        catalog: TileCatalog,
        mode: ViewportMode,
        grid: GridSize,
        preset: &[TileFrame],
    ) -> Self {
        warn_on_defects(&catalog, grid);
        let layout = finalize(&catalog.layout_from_frames(preset), grid);
        Self {
            mode,
            grid,
            catalog,
            layout,
            metrics: CellMetrics::default(),
            session: None,
            next_token: 1,
        }
    }

    /// Creates an engine from configuration for a viewport mode.
    #[must_use]
    pub fn from_config(config: &BentoConfig, mode: ViewportMode) -> Self {
        let setup = config.mode(mode);
        let mut engine = Self::new(config.catalog(), mode, setup.grid(), &setup.preset);
        engine.metrics.gap = config.cell_gap;
        engine
    }

    /// The active viewport mode.
    #[must_use]
    pub const fn mode(&self) -> ViewportMode { self.mode }

    /// The active board dimensions.
    #[must_use]
    pub const fn grid(&self) -> GridSize { self.grid }

    /// The committed layout (or the in-flight one during a drag).
    #[must_use]
    pub const fn layout(&self) -> &Layout { &self.layout }

    /// The tile catalog.
    #[must_use]
    pub const fn catalog(&self) -> &TileCatalog { &self.catalog }

    /// The live drag session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> { self.session.as_ref() }

    /// Pixel metrics used to turn pointer offsets into cell deltas.
    #[must_use]
    pub const fn metrics(&self) -> CellMetrics { self.metrics }

    /// Replaces the pixel metrics, e.g. after the container was resized.
    pub fn set_metrics(&mut self, metrics: CellMetrics) { self.metrics = metrics; }

    /// Cells not covered by any tile.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<GridCell> { empty_cells(&self.layout, self.grid) }

    /// Empty cells with their default filler tone.
    #[must_use]
    pub fn filler_cells(&self) -> Vec<FillerCell> { filler_cells(&self.layout, self.grid) }

    // ========================================================================
    // Drag Events
    // ========================================================================

    /// Starts moving a tile.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DragInProgress` if a session is already live and
    /// `LayoutError::UnknownTile` if the tile is not on the board.
    pub fn begin_move(
        &mut self,
        id: &str,
        pointer: PointerPosition,
    ) -> Result<DragToken, LayoutError> {
        self.begin(id, DragOperation::Move, pointer)
    }

    /// Starts resizing a tile from one edge or corner.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DragInProgress` if a session is already live and
    /// `LayoutError::UnknownTile` if the tile is not on the board.
    pub fn begin_resize(
        &mut self,
        id: &str,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> Result<DragToken, LayoutError> {
        self.begin(id, DragOperation::Resize(edge), pointer)
    }

    fn begin(
        &mut self,
        id: &str,
        operation: DragOperation,
        pointer: PointerPosition,
    ) -> Result<DragToken, LayoutError> {
        self.ensure_idle()?;
        let tile = self.layout.get(id).ok_or_else(|| LayoutError::UnknownTile(id.to_string()))?;

        let token = DragToken::new(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.session = Some(DragSession {
            token,
            operation,
            tile: tile.id.clone(),
            origin: tile.rect,
            start: pointer,
        });

        tracing::debug!(tile = %id, "grid: drag started ({operation:?})");
        Ok(token)
    }

    /// Updates the in-flight layout for a pointer position.
    ///
    /// Events for a stale token are ignored. If the candidate cannot be
    /// resolved the layout stays as it was.
    pub fn pointer_move(&mut self, token: DragToken, pointer: PointerPosition) -> &Layout {
        let Some(session) = self.live_session(token) else {
            return &self.layout;
        };
        let Some(tile) = self.layout.get(session.tile.as_str()) else {
            return &self.layout;
        };

        let candidate = session.candidate(pointer, &self.metrics, tile.behavior(), self.grid);
        let resolved = resolve_mutation(&self.layout, session.tile.as_str(), candidate, self.grid);
        if !resolved.same_frames(&self.layout) {
            tracing::trace!(tile = %session.tile, "grid: drag candidate {candidate}");
            self.layout = resolved;
        }
        &self.layout
    }

    /// Commits the drag with one sanitize pass and ends the session.
    pub fn pointer_up(&mut self, token: DragToken) -> &Layout {
        if self.live_session(token).is_some() {
            self.layout = sanitize(&self.layout, self.grid);
            self.session = None;
            tracing::debug!("grid: drag committed");
        }
        &self.layout
    }

    /// Ends the drag, keeping the last valid layout.
    pub fn pointer_cancel(&mut self, token: DragToken) -> &Layout {
        if self.live_session(token).is_some() {
            self.session = None;
            tracing::debug!("grid: drag cancelled");
        }
        &self.layout
    }

    // ========================================================================
    // Board Events
    // ========================================================================

    /// Reflows the whole board with a seeded shuffle.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DragInProgress` while a drag is live.
    pub fn request_shuffle(&mut self, seed: u64) -> Result<&Layout, LayoutError> {
        self.ensure_idle()?;
        self.layout = shuffle(&self.layout, self.grid, seed);
        Ok(&self.layout)
    }

    /// Switches to another board and replaces the layout with its preset.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DragInProgress` while a drag is live.
    pub fn mode_changed(
        &mut self,
        mode: ViewportMode,
        grid: GridSize,
        preset: &[TileFrame],
    ) -> Result<&Layout, LayoutError> {
        self.ensure_idle()?;
        warn_on_defects(&self.catalog, grid);
        self.mode = mode;
        self.grid = grid;
        self.layout = finalize(&self.catalog.layout_from_frames(preset), grid);
        tracing::debug!("grid: switched to {} ({grid})", mode.as_str());
        Ok(&self.layout)
    }

    /// Switches to another mode using the board and preset from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DragInProgress` while a drag is live.
    pub fn apply_mode(
        &mut self,
        config: &BentoConfig,
        mode: ViewportMode,
    ) -> Result<&Layout, LayoutError> {
        let setup = config.mode(mode);
        self.mode_changed(mode, setup.grid(), &setup.preset)
    }

    fn ensure_idle(&self) -> Result<(), LayoutError> {
        self.session
            .as_ref()
            .map_or(Ok(()), |session| Err(LayoutError::DragInProgress(session.tile.clone())))
    }

    fn live_session(&self, token: DragToken) -> Option<DragSession> {
        let session = self.session.as_ref().filter(|session| session.token == token);
        if session.is_none() {
            tracing::trace!("grid: ignoring event for stale drag token {}", token.get());
        }
        session.cloned()
    }
}

fn warn_on_defects(catalog: &TileCatalog, grid: GridSize) {
    for defect in catalog.validate(grid) {
        tracing::warn!("grid: {defect}");
    }
}

// ============================================================================
// Tests
// ============================================================================

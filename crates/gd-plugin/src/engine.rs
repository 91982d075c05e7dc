//! Placement engine: the message-driven core that puts icons on canvas.
//!
//! Owns the scene graph, the current selection, the latest viewport
//! snapshot, and the per-session insert state. Messages are handled one
//! at a time, each to completion — placement is a synchronous scene-graph
//! mutation. A failed operation notifies the user and leaves the document
//! exactly as it was.

use crate::host::{GraphicImporter, ImportError, Notifier};
use crate::mapper::{ChromeMetrics, map_drop_to_canvas};
use crate::message::{DropPayload, InsertPayload, MessageError, PluginMessage};
use gd_core::normalize::normalize_import;
use gd_core::select::{resolve_injection_target, resolve_offset};
use gd_core::{NodeId, NodeIndex, Point, SceneGraph, ViewportState};
use thiserror::Error;

/// Toast durations, in milliseconds.
const ADDED_TOAST_MS: u32 = 2_000;
const HINT_TOAST_MS: u32 = 4_000;

#[derive(Debug, Error)]
pub enum PlaceError {
    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Session-scoped insert state.
///
/// Explicit state threaded through the engine instead of ambient globals,
/// so the selection resolver stays pure and the hint logic is testable.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertSession {
    /// The user has dropped at least one icon this session.
    pub tried_drag_and_drop: bool,

    /// The drag-and-drop hint toast was already shown.
    pub hint_shown: bool,
}

/// The plugin core. All UI messages funnel through [`Self::handle_raw`].
pub struct PlacementEngine<I, N> {
    /// The live document (single source of truth).
    pub graph: SceneGraph,

    /// Currently selected node ids, topmost first.
    pub selection: Vec<NodeId>,

    /// Latest viewport snapshot pushed by the host.
    pub viewport: ViewportState,

    /// Host chrome measurements for drop mapping.
    pub chrome: ChromeMetrics,

    /// Session insert state.
    pub session: InsertSession,

    importer: I,
    notifier: N,
}

impl<I: GraphicImporter, N: Notifier> PlacementEngine<I, N> {
    pub fn new(importer: I, notifier: N) -> Self {
        Self {
            graph: SceneGraph::new(),
            selection: Vec::new(),
            viewport: ViewportState::default(),
            chrome: ChromeMetrics::default(),
            session: InsertSession::default(),
            importer,
            notifier,
        }
    }

    /// Update the viewport snapshot (bounds + zoom) from the host.
    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport = viewport;
    }

    /// First node of the current selection, if it still exists.
    fn selected_index(&self) -> Option<NodeIndex> {
        self.selection
            .first()
            .and_then(|id| self.graph.index_of(*id))
    }

    /// Decode and handle one raw message envelope.
    ///
    /// Every failure is absorbed here: the user gets a toast, the log gets
    /// the details, and the document stays untouched. The host session is
    /// never torn down by a bad message.
    pub fn handle_raw(&mut self, raw: &str) {
        let message = match PluginMessage::parse(raw) {
            Ok(message) => message,
            Err(err) => {
                log::warn!("rejected message: {err}");
                self.notifier.notify(&format!("⚠ {err}"), ADDED_TOAST_MS);
                return;
            }
        };

        if let Err(err) = self.handle_message(message) {
            log::warn!("placement failed: {err}");
            self.notifier.notify(&format!("⚠ {err}"), ADDED_TOAST_MS);
        }
    }

    /// Handle one decoded message, running it to completion.
    pub fn handle_message(&mut self, message: PluginMessage) -> Result<(), PlaceError> {
        match message {
            PluginMessage::Insert(payload) => self.insert_icon(&payload).map(|_| ()),
            PluginMessage::Drop(payload) => {
                self.session.tried_drag_and_drop = true;
                self.drop_icon(&payload).map(|_| ())
            }
            PluginMessage::Log(value) => {
                log::debug!(target: "gd::ui", "{value}");
                Ok(())
            }
        }
    }

    /// Place an icon near the current selection.
    pub fn insert_icon(&mut self, payload: &InsertPayload) -> Result<NodeIndex, PlaceError> {
        let selected = self.selected_index();
        let target = resolve_injection_target(&self.graph, selected);
        let position = resolve_offset(&self.graph, selected, &self.viewport);
        let placed = self.place(&payload.name, &payload.svg, target, position)?;

        // One-time nudge toward the faster gesture.
        if !self.session.tried_drag_and_drop && !self.session.hint_shown {
            self.session.hint_shown = true;
            self.notifier.notify("💡 Try drag-and-drop too!", HINT_TOAST_MS);
        }

        Ok(placed)
    }

    /// Place an icon at the mapped drop position, on the page root.
    pub fn drop_icon(&mut self, payload: &DropPayload) -> Result<NodeIndex, PlaceError> {
        let position = map_drop_to_canvas(payload, &self.viewport, &self.chrome);
        self.place(&payload.name, &payload.svg, self.graph.root, position)
    }

    /// Import, normalize, select, announce.
    ///
    /// The import is the only fallible step and runs first, so a failure
    /// can never leave a half-placed icon behind.
    fn place(
        &mut self,
        name: &str,
        svg: &str,
        target: NodeIndex,
        position: Point,
    ) -> Result<NodeIndex, PlaceError> {
        let wrapper = self.importer.import(&mut self.graph, svg)?;
        let placed = normalize_import(&mut self.graph, wrapper, target, name, position);

        self.selection = vec![self.graph.node(placed).id];
        self.notifier.notify(&format!("✔ Added {name}"), ADDED_TOAST_MS);
        Ok(placed)
    }
}

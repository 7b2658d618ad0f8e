use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::ENTITY_GRAB_RADIUS_PX;
use crate::doc::{
    Entity, EntityCatalog, EntityId, Formation, FormationDocument, Path, PlacementMap, Position, ValidationError,
};
use crate::draw::{self, Stroke};
use crate::hit;
use crate::input::{ActiveTool, DrawingTool, InputState, Mode, PointerPhase, ToolState};
use crate::render::{self, CanvasPainter};
use crate::surface::{Point, Rect};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EntityPlaced { id: EntityId, position: Position },
    EntityMoved { id: EntityId, position: Position },
    EntityRemoved { id: EntityId },
    PathCommitted { index: usize },
    PathErased { index: usize },
    DrawingsCleared,
    PlacementsCleared,
    SetCursor(&'static str),
    RenderNeeded,
}

/// A validated document handed to the host for storing, plus whatever the
/// save had to finish first (an in-progress stroke is committed).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub document: FormationDocument,
    pub actions: Vec<Action>,
}

/// Why a save could not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a save is already in progress")]
    InProgress,
}

/// Editor state and logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested natively.
pub struct EngineCore {
    pub doc: FormationDocument,
    pub catalog: EntityCatalog,
    pub tools: ToolState,
    pub input: InputState,
    /// The pitch rectangle in page pixels.
    pub surface: Rect,
    pub dpr: f64,
    saving: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: FormationDocument::new(),
            catalog: EntityCatalog::default(),
            tools: ToolState::default(),
            input: InputState::default(),
            surface: Rect::default(),
            dpr: 1.0,
            saving: false,
        }
    }
}

impl EngineCore {
    /// Open the editor on an empty formation.
    #[must_use]
    pub fn new(catalog: EntityCatalog) -> Self {
        Self { catalog, ..Self::default() }
    }

    /// Open the editor, seeded from a stored formation when editing one.
    #[must_use]
    pub fn open(catalog: EntityCatalog, existing: Option<FormationDocument>) -> Self {
        let mut core = Self::new(catalog);
        core.load(existing);
        core
    }

    // --- Data inputs ---

    /// Replace the working document. `None` starts a fresh formation.
    pub fn load(&mut self, existing: Option<FormationDocument>) -> Vec<Action> {
        let mut doc = existing.unwrap_or_default();
        let fixed = doc.sanitize();
        if fixed > 0 {
            warn!(name = %doc.name, fixed, "loaded formation had out-of-range or degenerate items");
        }
        self.doc = doc;
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    /// Update the pitch rectangle after a layout change.
    pub fn set_surface(&mut self, surface: Rect) -> Vec<Action> {
        self.surface = surface;
        vec![Action::RenderNeeded]
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if !self.saving {
            self.doc.name = name.into();
        }
    }

    // --- Tool selection ---

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        self.change_tools(|t| t.mode = mode)
    }

    pub fn toggle_drawing_mode(&mut self) -> Vec<Action> {
        self.change_tools(ToolState::toggle_drawing_mode)
    }

    pub fn set_drawing_tool(&mut self, tool: DrawingTool) -> Vec<Action> {
        self.change_tools(|t| t.drawing_tool = tool)
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> Vec<Action> {
        let color = color.into();
        self.change_tools(|t| t.color = color)
    }

    /// Any toolbar change first finishes the gesture in progress, so a stroke
    /// never switches tool or color halfway through.
    fn change_tools(&mut self, apply: impl FnOnce(&mut ToolState)) -> Vec<Action> {
        let before = self.tools.active();
        let mut actions = self.finish_gesture(None);
        apply(&mut self.tools);
        let after = self.tools.active();
        if before.cursor() != after.cursor() {
            actions.push(Action::SetCursor(after.cursor()));
        }
        actions
    }

    // --- Pointer input ---

    /// Single entry point for pointer events on the pitch, in page pixels.
    pub fn handle_pointer_event(&mut self, phase: PointerPhase, screen_pt: Point) -> Vec<Action> {
        if self.saving {
            return Vec::new();
        }
        match phase {
            PointerPhase::Down => self.pointer_down(screen_pt),
            PointerPhase::Move => self.pointer_move(screen_pt),
            PointerPhase::Up | PointerPhase::Leave => self.finish_gesture(Some(screen_pt)),
        }
    }

    fn pointer_down(&mut self, pt: Point) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) || !self.surface.contains(pt) {
            return Vec::new();
        }
        match self.tools.active() {
            ActiveTool::Placement => {
                if let Some(id) = hit::entity_at(&self.doc.placements, pt, &self.surface, ENTITY_GRAB_RADIUS_PX) {
                    self.input = InputState::DraggingEntity { id: id.to_owned(), start_screen: pt };
                }
                Vec::new()
            }
            ActiveTool::Erasing => self.erase(pt),
            active @ (ActiveTool::DrawingLine | ActiveTool::DrawingArrow) => {
                if let (Some(kind), Some(at)) = (active.stroke_kind(), self.surface.to_normalized(pt)) {
                    self.input = InputState::Capturing(Stroke::begin(kind, &self.tools.color, at));
                }
                Vec::new()
            }
        }
    }

    fn pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let InputState::Capturing(stroke) = &mut self.input else {
            return Vec::new();
        };
        match self.surface.to_normalized(pt) {
            Some(at) => {
                stroke.push(at);
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// End the current gesture. `release` is where the pointer came up; a
    /// tool change passes `None`, which abandons an entity drag in place.
    fn finish_gesture(&mut self, release: Option<Point>) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Capturing(stroke) => self.finish_stroke(stroke),
            InputState::DraggingEntity { id, start_screen } => match release {
                Some(pt) => self.finish_drag(&id, Point::new(pt.x - start_screen.x, pt.y - start_screen.y)),
                None => Vec::new(),
            },
        }
    }

    fn finish_stroke(&mut self, stroke: Stroke) -> Vec<Action> {
        let Some(path) = stroke.finish() else {
            debug!("discarded stroke with fewer than two points");
            return Vec::new();
        };
        self.doc.drawings = draw::commit(&self.doc.drawings, path);
        let index = self.doc.drawings.len() - 1;
        debug!(index, "stroke committed");
        vec![Action::PathCommitted { index }, Action::RenderNeeded]
    }

    fn finish_drag(&mut self, id: &str, delta: Point) -> Vec<Action> {
        let Some(next) = self.doc.placements.move_existing(&self.catalog, id, delta, &self.surface) else {
            return Vec::new();
        };
        if next == self.doc.placements {
            return Vec::new();
        }
        let Some(position) = next.get(id) else {
            return Vec::new();
        };
        self.doc.placements = next;
        debug!(id, x = position.x, y = position.y, "player moved");
        vec![Action::EntityMoved { id: id.to_owned(), position }, Action::RenderNeeded]
    }

    fn erase(&mut self, pt: Point) -> Vec<Action> {
        let Some(at) = self.surface.to_normalized(pt) else {
            return Vec::new();
        };
        let Some((index, next)) = draw::erase_at(&self.doc.drawings, at) else {
            return Vec::new();
        };
        self.doc.drawings = next;
        debug!(index, "stroke erased");
        vec![Action::PathErased { index }, Action::RenderNeeded]
    }

    // --- Roster drops and editor commands ---

    /// A player from the roster was dropped at `screen_pt`. Only honoured in
    /// placement mode.
    pub fn drop_entity(&mut self, id: &str, screen_pt: Point) -> Vec<Action> {
        if self.saving || self.tools.active().is_drawing() {
            return Vec::new();
        }
        let Some(next) = self.doc.placements.place_new(&self.catalog, id, screen_pt, &self.surface) else {
            return Vec::new();
        };
        let Some(position) = next.get(id) else {
            return Vec::new();
        };
        self.doc.placements = next;
        debug!(id, x = position.x, y = position.y, "player placed");
        vec![Action::EntityPlaced { id: id.to_owned(), position }, Action::RenderNeeded]
    }

    /// Take a player off the pitch.
    pub fn remove_entity(&mut self, id: &str) -> Vec<Action> {
        if self.saving || !self.doc.placements.contains(id) {
            return Vec::new();
        }
        self.doc.placements = self.doc.placements.remove(id);
        debug!(id, "player removed");
        vec![Action::EntityRemoved { id: id.to_owned() }, Action::RenderNeeded]
    }

    /// Delete every annotation, keeping placements.
    pub fn clear_drawings(&mut self) -> Vec<Action> {
        if self.saving {
            return Vec::new();
        }
        self.input = InputState::Idle;
        if self.doc.drawings.is_empty() {
            return Vec::new();
        }
        self.doc.drawings = Vec::new();
        vec![Action::DrawingsCleared, Action::RenderNeeded]
    }

    /// Delete every annotation and take every player off the pitch.
    pub fn clear_all(&mut self) -> Vec<Action> {
        if self.saving {
            return Vec::new();
        }
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if !self.doc.drawings.is_empty() {
            self.doc.drawings = Vec::new();
            actions.push(Action::DrawingsCleared);
        }
        if !self.doc.placements.is_empty() {
            self.doc.placements = PlacementMap::new();
            actions.push(Action::PlacementsCleared);
        }
        if !actions.is_empty() {
            debug!("formation cleared");
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Save / cancel ---

    /// Validate the working document and freeze edits until
    /// [`finish_save`](Self::finish_save). An in-progress stroke is committed
    /// first.
    ///
    /// # Errors
    ///
    /// [`SaveError::Invalid`] leaves the document and any stroke in progress
    /// untouched for correction;
    /// [`SaveError::InProgress`] when a save is already pending.
    pub fn begin_save(&mut self) -> Result<PendingSave, SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        // A finished stroke is always a valid path.
        self.doc.validate()?;
        let actions = self.finish_gesture(None);
        self.saving = true;
        Ok(PendingSave { document: self.doc.clone(), actions })
    }

    /// Report the store's answer. On success the stored record replaces the
    /// working copy; on failure the working copy is kept for a retry. Ignored
    /// when no save is pending.
    pub fn finish_save<E: std::fmt::Display>(&mut self, result: Result<Formation, E>) -> Vec<Action> {
        if !self.saving {
            debug!("ignoring save result with no save pending");
            return Vec::new();
        }
        self.saving = false;
        match result {
            Ok(formation) => {
                info!(id = %formation.id, name = %formation.name, "formation saved");
                self.load(Some(formation.document()))
            }
            Err(e) => {
                warn!(error = %e, "formation save failed; keeping working copy");
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Discard the working copy.
    pub fn cancel(&mut self) -> Vec<Action> {
        self.saving = false;
        self.load(None)
    }

    // --- Queries ---

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &FormationDocument {
        &self.doc
    }

    /// Roster entries not yet on the pitch.
    #[must_use]
    pub fn available_entities(&self) -> Vec<&Entity> {
        self.doc.placements.partition(&self.catalog).0
    }

    /// Roster entries on the pitch.
    #[must_use]
    pub fn placed_entities(&self) -> Vec<&Entity> {
        self.doc.placements.partition(&self.catalog).1
    }

    /// The stroke being captured, styled for live drawing.
    #[must_use]
    pub fn live_path(&self) -> Option<Path> {
        match &self.input {
            InputState::Capturing(stroke) => Some(stroke.preview()),
            _ => None,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.tools.active().cursor()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, core: EngineCore) -> Self {
        Self { canvas, core }
    }

    // --- Viewport ---

    /// Update the pitch rectangle and device pixel ratio, resizing the
    /// canvas backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, surface: Rect, dpr: f64) -> Vec<Action> {
        self.core.dpr = dpr;
        self.canvas.set_width((surface.width.max(0.0) * dpr).round() as u32);
        self.canvas.set_height((surface.height.max(0.0) * dpr).round() as u32);
        self.core.set_surface(surface)
    }

    // --- Input events ---

    pub fn on_pointer(&mut self, phase: PointerPhase, screen_pt: Point) -> Vec<Action> {
        self.core.handle_pointer_event(phase, screen_pt)
    }

    pub fn on_drop(&mut self, id: &str, screen_pt: Point) -> Vec<Action> {
        self.core.drop_entity(id, screen_pt)
    }

    // --- Render ---

    /// Draw the annotation layer to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let live = self.core.live_path();
        let mut painter = CanvasPainter::new(&ctx, self.core.dpr);
        render::draw(
            &mut painter,
            &self.core.doc.drawings,
            live.as_ref(),
            self.core.surface.width,
            self.core.surface.height,
        )
    }
}

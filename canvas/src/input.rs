//! Input model: editor modes, drawing tools, pointer phases and gesture state.
//!
//! `ToolState` is what the user picked in the toolbar; `ActiveTool` collapses
//! it into the single tagged value the engine dispatches on. `InputState` is
//! the gesture being tracked between pointer-down and pointer-up, carrying the
//! context needed to finish it on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_COLOR;
use crate::doc::{EntityId, PathKind};
use crate::draw::Stroke;
use crate::surface::Point;

/// Whether the pitch is arranging players or taking annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Drag players onto and around the pitch (default).
    #[default]
    Placement,
    /// Pointer input draws or erases annotations.
    Drawing,
}

/// Which drawing tool is selected. Only consulted in [`Mode::Drawing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingTool {
    /// Freehand line (default).
    #[default]
    Line,
    /// Freehand line ending in an arrowhead.
    Arrow,
    /// Click a stroke to delete it.
    Eraser,
}

/// The tool that actually receives pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTool {
    Placement,
    DrawingLine,
    DrawingArrow,
    Erasing,
}

impl ActiveTool {
    /// Path kind produced by this tool, if it draws.
    #[must_use]
    pub fn stroke_kind(self) -> Option<PathKind> {
        match self {
            Self::DrawingLine => Some(PathKind::Line),
            Self::DrawingArrow => Some(PathKind::Arrow),
            Self::Placement | Self::Erasing => None,
        }
    }

    /// Whether this tool takes pointer input on the drawing layer.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        !matches!(self, Self::Placement)
    }

    /// CSS cursor shown over the pitch.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Placement => "default",
            Self::DrawingLine | Self::DrawingArrow => "crosshair",
            Self::Erasing => "pointer",
        }
    }
}

/// Toolbar selection. Not persisted with the formation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolState {
    pub mode: Mode,
    pub drawing_tool: DrawingTool,
    /// CSS color for new strokes.
    pub color: String,
}

impl Default for ToolState {
    fn default() -> Self {
        Self { mode: Mode::default(), drawing_tool: DrawingTool::default(), color: DEFAULT_COLOR.to_owned() }
    }
}

impl ToolState {
    /// The single dispatch decision for pointer input.
    #[must_use]
    pub fn active(&self) -> ActiveTool {
        match (self.mode, self.drawing_tool) {
            (Mode::Placement, _) => ActiveTool::Placement,
            (Mode::Drawing, DrawingTool::Line) => ActiveTool::DrawingLine,
            (Mode::Drawing, DrawingTool::Arrow) => ActiveTool::DrawingArrow,
            (Mode::Drawing, DrawingTool::Eraser) => ActiveTool::Erasing,
        }
    }

    /// Flip between placement and drawing, keeping the chosen drawing tool.
    pub fn toggle_drawing_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Placement => Mode::Drawing,
            Mode::Drawing => Mode::Placement,
        };
    }
}

/// Stage of a pointer gesture, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer left the pitch; finishes a gesture like `Up`.
    Leave,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A placed player is being dragged across the pitch.
    DraggingEntity {
        /// Id of the player being dragged.
        id: EntityId,
        /// Pixel position at pointer-down; the move delta is measured from here.
        start_screen: Point,
    },
    /// A freehand stroke is being captured.
    Capturing(Stroke),
}

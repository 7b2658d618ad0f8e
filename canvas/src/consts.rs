//! Shared numeric constants for the canvas crate.

// ── Normalized space ────────────────────────────────────────────

/// Upper bound of a normalized coordinate (percent of the pitch).
pub const NORMALIZED_MAX: f64 = 100.0;

/// Pitch width:height reference ratio (2:3, portrait).
pub const PITCH_ASPECT: f64 = 2.0 / 3.0;

// ── Drawing ─────────────────────────────────────────────────────

/// Stroke width in pixels for committed and live paths.
pub const STROKE_WIDTH: f64 = 3.0;

/// Default annotation color.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Minimum number of points for a stroke to be kept.
pub const MIN_PATH_POINTS: usize = 2;

/// Arrowhead length in screen pixels.
pub const ARROW_HEAD_LENGTH_PX: f64 = 15.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Eraser tolerance in normalized units (2% of the pitch).
pub const ERASER_THRESHOLD: f64 = 2.0;

/// Screen-space radius in pixels within which a player marker can be grabbed.
pub const ENTITY_GRAB_RADIUS_PX: f64 = 20.0;

// ── Document ────────────────────────────────────────────────────

/// Maximum formation name length in characters.
pub const MAX_NAME_LEN: usize = 100;

//! Pitch surface geometry: pixel rectangles and pixel ⇄ percentage mapping.
//!
//! Pointer events arrive in CSS pixels relative to the page; placements and
//! strokes are stored as percentages of the pitch so they survive resizes.
//! Every conversion tolerates a collapsed (zero-size) surface by returning
//! `None`, which callers treat as "skip this placement or draw".

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::consts::{NORMALIZED_MAX, PITCH_ASPECT};
use crate::doc::Position;

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The pitch's bounding rectangle in pixels, as reported by the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A pitch of the given width with the reference 2:3 aspect ratio.
    #[must_use]
    pub fn with_pitch_aspect(left: f64, top: f64, width: f64) -> Self {
        Self { left, top, width, height: width / PITCH_ASPECT }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// A surface with no area cannot map coordinates.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether `p` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Convert a pixel point to a clamped normalized position.
    #[must_use]
    pub fn to_normalized(&self, p: Point) -> Option<Position> {
        if self.is_degenerate() {
            return None;
        }
        let x = (p.x - self.left) / self.width * NORMALIZED_MAX;
        let y = (p.y - self.top) / self.height * NORMALIZED_MAX;
        Some(Position::new(x, y).clamped())
    }

    /// Convert a normalized position back to pixels.
    #[must_use]
    pub fn to_pixels(&self, pos: Position) -> Option<Point> {
        if self.is_degenerate() {
            return None;
        }
        Some(Point {
            x: self.left + pos.x / NORMALIZED_MAX * self.width,
            y: self.top + pos.y / NORMALIZED_MAX * self.height,
        })
    }

    /// Convert a pixel delta to percentage units. X and Y scale independently
    /// because the pitch is not square.
    #[must_use]
    pub fn delta_to_normalized(&self, dx: f64, dy: f64) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }
        Some((dx / self.width * NORMALIZED_MAX, dy / self.height * NORMALIZED_MAX))
    }
}

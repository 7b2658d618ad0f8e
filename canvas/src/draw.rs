//! Drawing engine: freehand stroke capture and the annotations sequence.
//!
//! A [`Stroke`] is the in-progress path between pointer-down and pointer-up.
//! When the pointer is released it either becomes a committed [`Path`]
//! (two or more points) or is dropped. The committed sequence is only ever
//! replaced as a whole: [`commit`] and [`erase_at`] return the next sequence
//! and leave the input alone.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::consts::{ERASER_THRESHOLD, STROKE_WIDTH};
use crate::doc::{Path, PathKind, Position};
use crate::hit;

/// A stroke being captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    kind: PathKind,
    color: String,
    points: Vec<Position>,
}

impl Stroke {
    /// Start a stroke at the pointer-down position.
    #[must_use]
    pub fn begin(kind: PathKind, color: &str, at: Position) -> Self {
        Self { kind, color: color.to_owned(), points: vec![at.clamped()] }
    }

    /// Append the next pointer position. A position equal to the previous one
    /// (e.g. two moves clamped onto the same edge point) is not repeated.
    pub fn push(&mut self, at: Position) {
        let at = at.clamped();
        if self.points.last() != Some(&at) {
            self.points.push(at);
        }
    }

    /// The stroke as it should be drawn live, before release.
    #[must_use]
    pub fn preview(&self) -> Path {
        Path { kind: self.kind, points: self.points.clone(), color: self.color.clone(), width: STROKE_WIDTH }
    }

    /// Finish the stroke. Fewer than two points yields `None`.
    #[must_use]
    pub fn finish(self) -> Option<Path> {
        let path = Path { kind: self.kind, points: self.points, color: self.color, width: STROKE_WIDTH };
        (!path.is_degenerate()).then_some(path)
    }
}

/// Append `path` on top of `drawings`.
#[must_use]
pub fn commit(drawings: &[Path], path: Path) -> Vec<Path> {
    let mut next = Vec::with_capacity(drawings.len() + 1);
    next.extend_from_slice(drawings);
    next.push(path);
    next
}

/// Remove the topmost path within the eraser threshold of `at`.
///
/// Returns the erased index and the remaining sequence, or `None` on a miss.
#[must_use]
pub fn erase_at(drawings: &[Path], at: Position) -> Option<(usize, Vec<Path>)> {
    let index = hit::topmost_path_at(drawings, at, ERASER_THRESHOLD)?;
    let mut next = drawings.to_vec();
    next.remove(index);
    Some((index, next))
}

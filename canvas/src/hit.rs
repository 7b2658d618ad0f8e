#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Path, PlacementMap, Position};
use crate::surface::{Point, Rect};

/// Distance from `p` to the segment `a`–`b`, in normalized units.
///
/// Projects `p` onto the segment, clamps the projection to the endpoints, and
/// measures to the foot. A zero-length segment falls back to point distance.
#[must_use]
pub fn point_segment_distance(p: Position, a: Position, b: Position) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let foot = Position::new(a.x + t * dx, a.y + t * dy);
    p.distance(foot)
}

/// Whether any segment of `path` passes strictly within `threshold` of `p`.
#[must_use]
pub fn path_hit(path: &Path, p: Position, threshold: f64) -> bool {
    path.segments().any(|(a, b)| point_segment_distance(p, a, b) < threshold)
}

/// Index of the topmost path under `p`, searching newest first.
#[must_use]
pub fn topmost_path_at(drawings: &[Path], p: Position, threshold: f64) -> Option<usize> {
    drawings.iter().rposition(|path| path_hit(path, p, threshold))
}

/// The placed entity whose marker centre is nearest to `screen_pt`, within
/// `radius_px` pixels.
#[must_use]
pub fn entity_at<'a>(placements: &'a PlacementMap, screen_pt: Point, surface: &Rect, radius_px: f64) -> Option<&'a str> {
    placements
        .iter()
        .filter_map(|(id, pos)| {
            let centre = surface.to_pixels(pos)?;
            let d = centre.distance(screen_pt);
            (d <= radius_px).then_some((id.as_str(), d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

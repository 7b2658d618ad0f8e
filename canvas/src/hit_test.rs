#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::PathKind;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pos(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn line(points: &[(f64, f64)]) -> Path {
    Path {
        kind: PathKind::Line,
        points: points.iter().map(|&(x, y)| pos(x, y)).collect(),
        color: "#FFFFFF".to_owned(),
        width: 3.0,
    }
}

// =============================================================
// point_segment_distance
// =============================================================

#[test]
fn distance_perpendicular_foot_inside_segment() {
    let d = point_segment_distance(pos(5.0, 3.0), pos(0.0, 0.0), pos(10.0, 0.0));
    assert!(approx_eq(d, 3.0));
}

#[test]
fn distance_clamps_before_start() {
    let d = point_segment_distance(pos(-3.0, 4.0), pos(0.0, 0.0), pos(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn distance_clamps_after_end() {
    let d = point_segment_distance(pos(13.0, -4.0), pos(0.0, 0.0), pos(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn distance_on_segment_is_zero() {
    let d = point_segment_distance(pos(2.5, 2.5), pos(0.0, 0.0), pos(5.0, 5.0));
    assert!(approx_eq(d, 0.0));
}

#[test]
fn distance_zero_length_segment_uses_point_distance() {
    let d = point_segment_distance(pos(3.0, 4.0), pos(0.0, 0.0), pos(0.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn distance_is_symmetric_in_segment_direction() {
    let p = pos(7.0, 9.0);
    let a = pos(1.0, 2.0);
    let b = pos(11.0, 3.0);
    assert!(approx_eq(point_segment_distance(p, a, b), point_segment_distance(p, b, a)));
}

// =============================================================
// path_hit / topmost_path_at
// =============================================================

#[test]
fn eraser_hits_horizontal_path_within_threshold() {
    let path = line(&[(10.0, 50.0), (90.0, 50.0)]);
    assert!(path_hit(&path, pos(50.0, 51.0), 2.0));
}

#[test]
fn eraser_misses_horizontal_path_outside_threshold() {
    let path = line(&[(10.0, 50.0), (90.0, 50.0)]);
    assert!(!path_hit(&path, pos(50.0, 60.0), 2.0));
}

#[test]
fn path_hit_threshold_is_strict() {
    let path = line(&[(0.0, 0.0), (10.0, 0.0)]);
    assert!(!path_hit(&path, pos(5.0, 2.0), 2.0));
    assert!(path_hit(&path, pos(5.0, 1.999), 2.0));
}

#[test]
fn path_hit_checks_every_segment() {
    let path = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]);
    assert!(path_hit(&path, pos(11.0, 5.0), 2.0));
    assert!(path_hit(&path, pos(15.0, 11.0), 2.0));
    assert!(!path_hit(&path, pos(5.0, 5.0), 2.0));
}

#[test]
fn single_point_path_is_never_hit() {
    let path = line(&[(5.0, 5.0)]);
    assert!(!path_hit(&path, pos(5.0, 5.0), 2.0));
}

#[test]
fn topmost_prefers_most_recent_path() {
    let drawings = vec![
        line(&[(0.0, 50.0), (100.0, 50.0)]),
        line(&[(50.0, 0.0), (50.0, 100.0)]),
        line(&[(0.0, 0.0), (10.0, 0.0)]),
    ];
    assert_eq!(topmost_path_at(&drawings, pos(50.0, 50.0), 2.0), Some(1));
}

#[test]
fn topmost_finds_older_path_when_newer_misses() {
    let drawings = vec![line(&[(0.0, 50.0), (100.0, 50.0)]), line(&[(0.0, 0.0), (10.0, 0.0)])];
    assert_eq!(topmost_path_at(&drawings, pos(70.0, 50.5), 2.0), Some(0));
}

#[test]
fn topmost_miss_is_none() {
    let drawings = vec![line(&[(0.0, 50.0), (100.0, 50.0)])];
    assert_eq!(topmost_path_at(&drawings, pos(50.0, 90.0), 2.0), None);
    assert_eq!(topmost_path_at(&[], pos(50.0, 90.0), 2.0), None);
}

// =============================================================
// entity_at
// =============================================================

fn placements() -> PlacementMap {
    [("p1".to_owned(), pos(25.0, 25.0)), ("p2".to_owned(), pos(30.0, 25.0))]
        .into_iter()
        .collect()
}

#[test]
fn entity_at_picks_nearest_marker() {
    let surface = Rect::new(0.0, 0.0, 200.0, 200.0);
    // p1 at (50, 50) px, p2 at (60, 50) px.
    assert_eq!(entity_at(&placements(), Point::new(52.0, 50.0), &surface, 20.0), Some("p1"));
    assert_eq!(entity_at(&placements(), Point::new(58.0, 50.0), &surface, 20.0), Some("p2"));
}

#[test]
fn entity_at_respects_radius() {
    let surface = Rect::new(0.0, 0.0, 200.0, 200.0);
    assert_eq!(entity_at(&placements(), Point::new(150.0, 150.0), &surface, 20.0), None);
}

#[test]
fn entity_at_uses_surface_offset() {
    let surface = Rect::new(100.0, 100.0, 200.0, 200.0);
    assert_eq!(entity_at(&placements(), Point::new(150.0, 150.0), &surface, 5.0), Some("p1"));
}

#[test]
fn entity_at_degenerate_surface_is_none() {
    assert_eq!(entity_at(&placements(), Point::new(0.0, 0.0), &Rect::default(), 1e9), None);
}

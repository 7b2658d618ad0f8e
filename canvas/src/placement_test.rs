#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn catalog() -> EntityCatalog {
    EntityCatalog::new(vec![
        Entity::new("p1", "A", "1"),
        Entity::new("p2", "B", "7"),
        Entity::new("p3", "C", "10"),
    ])
}

fn pitch() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 300.0)
}

fn ids<'a>(entities: &[&'a Entity]) -> Vec<&'a str> {
    entities.iter().map(|e| e.id.as_str()).collect()
}

// =============================================================
// place_new
// =============================================================

#[test]
fn place_new_inside_surface() {
    let map = PlacementMap::new()
        .place_new(&catalog(), "p1", Point::new(50.0, 50.0), &pitch())
        .unwrap();
    let pos = map.get("p1").unwrap();
    assert!(approx_eq(pos.x, 25.0));
    assert!((pos.y - 16.67).abs() < 0.01);
}

#[test]
fn place_new_on_edge_is_accepted() {
    let map = PlacementMap::new()
        .place_new(&catalog(), "p1", Point::new(200.0, 300.0), &pitch())
        .unwrap();
    assert_eq!(map.get("p1"), Some(Position::new(100.0, 100.0)));
}

#[test]
fn place_new_outside_surface_is_rejected() {
    let map = PlacementMap::new();
    assert!(map.place_new(&catalog(), "p1", Point::new(201.0, 10.0), &pitch()).is_none());
    assert!(map.place_new(&catalog(), "p1", Point::new(10.0, -0.5), &pitch()).is_none());
}

#[test]
fn place_new_unknown_entity_is_rejected() {
    let map = PlacementMap::new();
    assert!(map.place_new(&catalog(), "ghost", Point::new(10.0, 10.0), &pitch()).is_none());
}

#[test]
fn place_new_degenerate_surface_is_rejected() {
    let map = PlacementMap::new();
    assert!(map.place_new(&catalog(), "p1", Point::new(0.0, 0.0), &Rect::default()).is_none());
}

#[test]
fn place_new_again_updates_instead_of_duplicating() {
    let map = PlacementMap::new()
        .place_new(&catalog(), "p1", Point::new(20.0, 30.0), &pitch())
        .unwrap()
        .place_new(&catalog(), "p1", Point::new(100.0, 150.0), &pitch())
        .unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("p1"), Some(Position::new(50.0, 50.0)));
}

#[test]
fn place_new_leaves_original_untouched() {
    let map = PlacementMap::new();
    let next = map.place_new(&catalog(), "p1", Point::new(20.0, 30.0), &pitch()).unwrap();
    assert!(map.is_empty());
    assert_eq!(next.len(), 1);
}

// =============================================================
// move_existing
// =============================================================

#[test]
fn move_existing_scales_delta_per_axis() {
    let map: PlacementMap = [("p1".to_owned(), Position::new(50.0, 50.0))].into_iter().collect();
    let next = map.move_existing(&catalog(), "p1", Point::new(20.0, 30.0), &pitch()).unwrap();
    let pos = next.get("p1").unwrap();
    assert!(approx_eq(pos.x, 60.0));
    assert!(approx_eq(pos.y, 60.0));
}

#[test]
fn move_existing_pins_to_bounds() {
    let map: PlacementMap = [("p1".to_owned(), Position::new(95.0, 3.0))].into_iter().collect();
    let next = map.move_existing(&catalog(), "p1", Point::new(500.0, -500.0), &pitch()).unwrap();
    assert_eq!(next.get("p1"), Some(Position::new(100.0, 0.0)));
}

#[test]
fn move_existing_requires_placement() {
    let map = PlacementMap::new();
    assert!(map.move_existing(&catalog(), "p1", Point::new(1.0, 1.0), &pitch()).is_none());
}

#[test]
fn move_existing_unknown_entity_is_rejected() {
    let map: PlacementMap = [("ghost".to_owned(), Position::new(5.0, 5.0))].into_iter().collect();
    assert!(map.move_existing(&catalog(), "ghost", Point::new(1.0, 1.0), &pitch()).is_none());
}

#[test]
fn move_existing_degenerate_surface_is_rejected() {
    let map: PlacementMap = [("p1".to_owned(), Position::new(5.0, 5.0))].into_iter().collect();
    assert!(map.move_existing(&catalog(), "p1", Point::new(1.0, 1.0), &Rect::default()).is_none());
}

// =============================================================
// remove / partition
// =============================================================

#[test]
fn remove_deletes_key() {
    let map: PlacementMap = [
        ("p1".to_owned(), Position::new(5.0, 5.0)),
        ("p2".to_owned(), Position::new(6.0, 6.0)),
    ]
    .into_iter()
    .collect();
    let next = map.remove("p1");
    assert!(!next.contains("p1"));
    assert!(next.contains("p2"));
}

#[test]
fn remove_is_idempotent() {
    let map: PlacementMap = [("p1".to_owned(), Position::new(5.0, 5.0))].into_iter().collect();
    let once = map.remove("p1");
    let twice = once.remove("p1");
    assert_eq!(once, twice);
    assert_eq!(map.remove("absent"), map);
}

#[test]
fn partition_splits_in_catalog_order() {
    let map: PlacementMap = [("p2".to_owned(), Position::new(5.0, 5.0))].into_iter().collect();
    let cat = catalog();
    let (available, placed) = map.partition(&cat);
    assert_eq!(ids(&available), vec!["p1", "p3"]);
    assert_eq!(ids(&placed), vec!["p2"]);
}

#[test]
fn partition_ignores_placements_missing_from_catalog() {
    let map: PlacementMap = [("ghost".to_owned(), Position::new(5.0, 5.0))].into_iter().collect();
    let cat = catalog();
    let (available, placed) = map.partition(&cat);
    assert_eq!(available.len(), 3);
    assert!(placed.is_empty());
}

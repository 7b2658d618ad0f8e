//! Placement engine: putting players on the pitch and moving them around.
//!
//! Every operation takes the current [`PlacementMap`] by reference and returns
//! the next one, so the editor can redraw from a fresh value after each
//! change. Rejected operations (drop outside the pitch, unknown player,
//! collapsed surface) return `None` and leave the caller's map untouched.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::doc::{Entity, EntityCatalog, PlacementMap, Position};
use crate::surface::{Point, Rect};

impl PlacementMap {
    /// Drop `id` from the roster onto the pitch at pixel `drop`.
    ///
    /// Fails when the drop lands outside `surface` (edges count as inside),
    /// when `id` is not in the catalog, or when the surface has no area.
    /// Dropping an already placed player moves it rather than duplicating it.
    #[must_use]
    pub fn place_new(&self, catalog: &EntityCatalog, id: &str, drop: Point, surface: &Rect) -> Option<Self> {
        if !catalog.contains(id) || !surface.contains(drop) {
            return None;
        }
        let pos = surface.to_normalized(drop)?;
        Some(self.with(id, pos))
    }

    /// Shift an already placed player by a pixel delta, pinned to the pitch.
    #[must_use]
    pub fn move_existing(&self, catalog: &EntityCatalog, id: &str, delta: Point, surface: &Rect) -> Option<Self> {
        if !catalog.contains(id) {
            return None;
        }
        let old = self.get(id)?;
        let (dx, dy) = surface.delta_to_normalized(delta.x, delta.y)?;
        Some(self.with(id, Position::new(old.x + dx, old.y + dy)))
    }

    /// Take a player off the pitch. Removing an absent player is a no-op.
    #[must_use]
    pub fn remove(&self, id: &str) -> Self {
        self.without(id)
    }

    /// Split the roster into players still available and players on the pitch,
    /// both in roster order.
    #[must_use]
    pub fn partition<'a>(&self, catalog: &'a EntityCatalog) -> (Vec<&'a Entity>, Vec<&'a Entity>) {
        catalog.iter().partition(|e| !self.contains(&e.id))
    }
}

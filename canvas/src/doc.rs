//! Document model: positions, paths, the formation aggregate and its wire shape.
//!
//! This module defines the data that describes a formation (`Position`,
//! `Path`, `PlacementMap`, `FormationDocument`), the records exchanged with the
//! formation store (`FormationData`, `Formation`, `FormationUpdate`), the
//! read-only player roster (`EntityCatalog`), and the save-time validation
//! rules (`ValidationError`).
//!
//! Data flows into this layer from the store (JSON deserialization) and from
//! the editing engines (placements and drawings). The renderer reads the
//! drawings sequence in order; the last path is drawn on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_NAME_LEN, MIN_PATH_POINTS, NORMALIZED_MAX};

/// Identifier of a placeable entity (a player id issued by the roster).
pub type EntityId = String;

// =============================================================
// Errors
// =============================================================

/// Reasons a formation cannot be saved. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,
    #[error("name exceeds {max} characters ({len})", max = MAX_NAME_LEN)]
    NameTooLong { len: usize },
    #[error("at least one player must be placed")]
    NoPlacements,
    #[error("invalid position for player {id}")]
    PositionOutOfRange { id: EntityId },
    #[error("drawing {index} has fewer than 2 points")]
    DegeneratePath { index: usize },
    #[error("drawing {index} has a point outside the pitch")]
    PathPointOutOfRange { index: usize },
    #[error("drawing {index} has an invalid stroke width")]
    InvalidStrokeWidth { index: usize },
}

/// Failure to decode or encode a formation document.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("invalid formation JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================
// Position
// =============================================================

/// A normalized point on the pitch: percent offsets from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pin both coordinates into `[0, 100]`. NaN collapses to 0.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: clamp_coord(self.x), y: clamp_coord(self.y) }
    }

    /// Whether both coordinates lie within `[0, 100]`.
    #[must_use]
    pub fn is_in_range(self) -> bool {
        (0.0..=NORMALIZED_MAX).contains(&self.x) && (0.0..=NORMALIZED_MAX).contains(&self.y)
    }

    /// Euclidean distance in normalized units.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

fn clamp_coord(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, NORMALIZED_MAX) }
}

// =============================================================
// Path
// =============================================================

/// Whether a stroke is rendered as a plain line or with an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Line,
    Arrow,
}

/// One committed freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Line or arrow.
    #[serde(rename = "type")]
    pub kind: PathKind,
    /// Ordered stroke points in normalized space.
    pub points: Vec<Position>,
    /// CSS color string, e.g. `"#FFFFFF"`.
    pub color: String,
    /// Stroke width in pixels.
    pub width: f64,
}

impl Path {
    /// A path with fewer than two points cannot be drawn or kept.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < MIN_PATH_POINTS
    }

    /// Consecutive point pairs, in stroke order.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// The final segment with distinct endpoints, which determines arrowhead
    /// direction. Points repeating the tip are skipped.
    #[must_use]
    pub fn last_segment(&self) -> Option<(Position, Position)> {
        let (&tip, rest) = self.points.split_last()?;
        let tail = rest.iter().rev().find(|p| **p != tip)?;
        Some((*tail, tip))
    }
}

// =============================================================
// PlacementMap
// =============================================================

/// Entity id → normalized position. Keys are unique; serialized sorted.
///
/// Mutating operations live in [`crate::placement`] and return a new map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementMap(BTreeMap<EntityId, Position>);

impl PlacementMap {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Position> {
        self.0.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate placements in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, Position)> {
        self.0.iter().map(|(id, pos)| (id, *pos))
    }

    pub(crate) fn with(&self, id: &str, pos: Position) -> Self {
        let mut next = self.0.clone();
        next.insert(id.to_owned(), pos.clamped());
        Self(next)
    }

    pub(crate) fn without(&self, id: &str) -> Self {
        let mut next = self.0.clone();
        next.remove(id);
        Self(next)
    }
}

impl FromIterator<(EntityId, Position)> for PlacementMap {
    fn from_iter<I: IntoIterator<Item = (EntityId, Position)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, pos)| (id, pos.clamped())).collect())
    }
}

// =============================================================
// Wire records
// =============================================================

/// The `formationData` JSON column: placements plus optional annotations.
///
/// `drawings` is omitted from the output when empty and defaults to empty
/// when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationData {
    pub players: PlacementMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drawings: Vec<Path>,
}

/// Create payload as sent to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormationPayload {
    name: String,
    formation_data: FormationData,
}

/// A formation as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    pub id: String,
    pub name: String,
    pub formation_data: FormationData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Formation {
    /// The editable document for this stored record.
    #[must_use]
    pub fn document(&self) -> FormationDocument {
        FormationDocument {
            name: self.name.clone(),
            placements: self.formation_data.players.clone(),
            drawings: self.formation_data.drawings.clone(),
        }
    }
}

/// Partial update. Only present fields are replaced by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formation_data: Option<FormationData>,
}

impl FormationUpdate {
    /// Apply the same rules as a full save to whichever fields are present.
    ///
    /// # Errors
    ///
    /// Returns the first rule the present fields break.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(data) = &self.formation_data {
            validate_placements(&data.players)?;
            validate_drawings(&data.drawings)?;
        }
        Ok(())
    }
}

// =============================================================
// FormationDocument
// =============================================================

/// The formation being edited: name, placements and annotations.
///
/// Serializes to the store's create payload
/// (`{"name": ..., "formationData": {"players": ..., "drawings": ...}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FormationPayload", into = "FormationPayload")]
pub struct FormationDocument {
    pub name: String,
    pub placements: PlacementMap,
    pub drawings: Vec<Path>,
}

impl From<FormationPayload> for FormationDocument {
    fn from(p: FormationPayload) -> Self {
        Self { name: p.name, placements: p.formation_data.players, drawings: p.formation_data.drawings }
    }
}

impl From<FormationDocument> for FormationPayload {
    fn from(d: FormationDocument) -> Self {
        Self {
            name: d.name,
            formation_data: FormationData { players: d.placements, drawings: d.drawings },
        }
    }
}

impl FormationDocument {
    /// An empty, unnamed formation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the store's wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if the input is not a formation document.
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode to the store's wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if encoding fails (non-finite numbers).
    pub fn to_json(&self) -> Result<String, DocError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The `formationData` part of the document.
    #[must_use]
    pub fn data(&self) -> FormationData {
        FormationData { players: self.placements.clone(), drawings: self.drawings.clone() }
    }

    /// Check the save-time rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the document breaks; drawings are only checked
    /// once name and placements pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_placements(&self.placements)?;
        validate_drawings(&self.drawings)
    }

    /// Pull a loaded document back inside the editor's invariants: positions
    /// clamped, degenerate strokes dropped. Returns how many items changed.
    pub fn sanitize(&mut self) -> usize {
        let mut fixed = 0;

        let placements: PlacementMap = self
            .placements
            .iter()
            .map(|(id, pos)| {
                if !pos.is_in_range() {
                    fixed += 1;
                }
                (id.clone(), pos)
            })
            .collect();
        self.placements = placements;

        let before = self.drawings.len();
        self.drawings.retain(|p| !p.is_degenerate());
        fixed += before - self.drawings.len();

        for path in &mut self.drawings {
            for pt in &mut path.points {
                if !pt.is_in_range() {
                    *pt = pt.clamped();
                    fixed += 1;
                }
            }
        }
        fixed
    }

    /// Counts for list views.
    #[must_use]
    pub fn summary(&self) -> FormationSummary {
        FormationSummary {
            name: self.name.clone(),
            players: self.placements.len(),
            drawings: self.drawings.len(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { len });
    }
    Ok(())
}

fn validate_placements(placements: &PlacementMap) -> Result<(), ValidationError> {
    if placements.is_empty() {
        return Err(ValidationError::NoPlacements);
    }
    match placements.0.iter().find(|(_, pos)| !pos.is_in_range()) {
        Some((id, _)) => Err(ValidationError::PositionOutOfRange { id: id.clone() }),
        None => Ok(()),
    }
}

fn validate_drawings(drawings: &[Path]) -> Result<(), ValidationError> {
    for (index, path) in drawings.iter().enumerate() {
        if path.is_degenerate() {
            return Err(ValidationError::DegeneratePath { index });
        }
        if path.points.iter().any(|p| !p.is_in_range()) {
            return Err(ValidationError::PathPointOutOfRange { index });
        }
        if !(path.width.is_finite() && path.width > 0.0) {
            return Err(ValidationError::InvalidStrokeWidth { index });
        }
    }
    Ok(())
}

/// Player and annotation counts for a formation card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormationSummary {
    pub name: String,
    pub players: usize,
    pub drawings: usize,
}

impl FormationSummary {
    #[must_use]
    pub fn has_drawings(&self) -> bool {
        self.drawings > 0
    }
}

// =============================================================
// Entity catalog
// =============================================================

/// A placeable player as supplied by the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Short marker label, typically the shirt number.
    #[serde(default)]
    pub short_label: String,
}

impl Entity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, short_label: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), short_label: short_label.into() }
    }
}

/// Read-only roster of placeable entities, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
}

impl EntityCatalog {
    #[must_use]
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

//! Formation canvas engine for the club's tactics board.
//!
//! This crate runs in the browser (compiled to WebAssembly) and natively in
//! tests. It owns the editing session of one formation: translating pointer
//! events on the pitch into player placements and freehand annotations,
//! hit-testing strokes for the eraser, and redrawing the scene. The host layer
//! only wires DOM events to the engine and hands the finished
//! [`doc::FormationDocument`] to the formation store.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Formation document, wire shape, entity catalog, validation |
//! | [`surface`] | Pitch rectangle and pixel ⇄ percentage conversions |
//! | [`placement`] | Dropping, moving and removing players on the pitch |
//! | [`draw`] | Freehand stroke capture, commit and erase |
//! | [`hit`] | Point-to-segment distance and stroke hit-testing |
//! | [`input`] | Tool state machine and pointer gesture state |
//! | [`render`] | Immediate-mode scene rendering and arrow-head geometry |
//! | [`consts`] | Shared numeric constants (stroke width, eraser slop, etc.) |

pub mod consts;
pub mod doc;
pub mod draw;
pub mod engine;
pub mod hit;
pub mod input;
pub mod placement;
pub mod render;
pub mod surface;

//! Document core for the engram editor.
//!
//! An engram is a crossword-like chain of words on an infinite grid. Any word
//! may host a nested grid (a "ladder"), so a document is a tree of layers.
//! This crate owns the model and everything with real invariants: placement
//! geometry, chain validation, the cell index, stability scoring, undo/redo
//! editing, JSON persistence, and projection of the layer tree into a 3D
//! graph. Rendering and input handling are callers of [`editor::EditorCore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Editor state container: mutations, drafting, navigation, history |
//! | [`doc`] | Document, layer, word and cell types |
//! | [`geometry`] | Coordinates, facing, footprints, word centers |
//! | [`cells`] | Cell index rebuild |
//! | [`validator`] | Single-path chain validation, step listing, validation report |
//! | [`stability`] | Stability score and status tiers |
//! | [`dictionary`] | Known-word set for the scorer |
//! | [`history`] | Undo/redo snapshot stacks |
//! | [`serialize`] | JSON import/export |
//! | [`graph`] | 3D node/edge projection of the layer tree, route walk |
//! | [`roots`] | Nested outline of the layer tree |
//! | [`consts`] | Scoring weights, projection spacing, format constants |

pub mod cells;
pub mod consts;
pub mod dictionary;
pub mod doc;
pub mod editor;
pub mod geometry;
pub mod graph;
pub mod history;
pub mod roots;
pub mod serialize;
pub mod stability;
pub mod validator;

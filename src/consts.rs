//! Shared constants for the engram document model.

// ── Document ────────────────────────────────────────────────────

/// The only serialized document version this crate reads or writes.
pub const FORMAT_VERSION: u32 = 1;

/// Id of the root layer in a freshly created document.
pub const ROOT_LAYER_ID: &str = "root";

/// Prefix for ids of layers created by enabling a ladder.
pub const LAYER_ID_PREFIX: &str = "layer-";

// ── Stability scoring ───────────────────────────────────────────

/// Penalty applied for each word that breaks the chain.
pub const INVALID_WORD_PENALTY: i64 = 500;

/// Base award for each valid word.
pub const WORD_BASE_SCORE: i64 = 100;

/// Award per character of a valid word.
pub const PER_CHAR_SCORE: i64 = 10;

/// Award for a valid word found in the dictionary.
pub const DICTIONARY_BONUS: i64 = 500;

/// Award per shared cell with the preceding word, beyond the first.
pub const EXTRA_INTERLOCK_BONUS: i64 = 150;

/// Award for a valid word that hosts a ladder.
pub const LADDER_BONUS: i64 = 1000;

/// Award per layer in the document beyond the root.
pub const NESTED_LAYER_BONUS: i64 = 2000;

// ── Graph projection ────────────────────────────────────────────

/// Distance along z between consecutive nesting depths.
pub const LAYER_SPACING_Z: f64 = 5.0;

/// World units per grid cell in the projected graph.
pub const GRID_UNIT: f64 = 1.0;

/// Display text of the placeholder node standing in for an empty child layer.
pub const EMPTY_LAYER_TEXT: &str = "(EMPTY)";

// ── Layer comments ──────────────────────────────────────────────

/// Rows above the topmost word where a layer's default comment anchor sits.
pub const COMMENT_ANCHOR_LIFT: f64 = 3.0;

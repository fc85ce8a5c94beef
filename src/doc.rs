//! Document model: layers, word placements, derived cells, and the document.
//!
//! A [`Document`] is a flat map of [`Layer`]s plus the id of the root layer.
//! Layers form a tree through [`WordPlacement::ladder_layer_id`]: a word with a
//! ladder points at exactly one child layer. The tree is not enforced by the
//! types, so consumers must tolerate dangling references and cycles coming
//! from imported data; [`Document::integrity_issues`] reports them.
//!
//! Field names serialize in camelCase to match the persisted JSON format.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{COMMENT_ANCHOR_LIFT, FORMAT_VERSION, LAYER_ID_PREFIX, ROOT_LAYER_ID};
use crate::geometry::{Coord, Direction, Point, footprint};

/// Unique identifier for a layer.
pub type LayerId = String;

/// Unique identifier for a word placement.
pub type WordId = String;

/// Fresh, globally unique word id.
#[must_use]
pub fn new_word_id() -> WordId {
    Uuid::new_v4().simple().to_string()
}

/// Fresh, globally unique layer id.
#[must_use]
pub fn new_layer_id() -> LayerId {
    format!("{LAYER_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// A word placed on a layer's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPlacement {
    pub id: WordId,
    /// The layer this word was placed on.
    pub layer_id: LayerId,
    /// Creation time in milliseconds since the Unix epoch. Display only.
    #[serde(default)]
    pub created_at: i64,
    pub start: Coord,
    pub direction: Direction,
    /// Uppercase letters, digits and spaces; one cell per character.
    pub text: String,
    /// Child layer hosted by this word, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder_layer_id: Option<LayerId>,
}

impl WordPlacement {
    /// Number of cells the word covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn has_ladder(&self) -> bool {
        self.ladder_layer_id.is_some()
    }
}

/// Derived occupancy of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub coord: Coord,
    /// Last-written character at this cell, in word-list order.
    #[serde(rename = "char")]
    pub ch: char,
    /// Ids of every word covering this cell, without duplicates.
    pub word_ids: Vec<WordId>,
}

/// One grid of word placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Explicit comment anchor; see [`Layer::comment_anchor`] for the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_pos: Option<Point>,
    /// Derived cell index keyed by [`crate::geometry::coord_key`].
    #[serde(default)]
    pub cells_by_key: BTreeMap<String, Cell>,
    /// Ordered words. Order defines the chain and the step numbering.
    #[serde(default)]
    pub words: Vec<WordPlacement>,
}

impl Layer {
    /// Create an empty layer.
    #[must_use]
    pub fn new(id: impl Into<LayerId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            comment: None,
            comment_pos: None,
            cells_by_key: BTreeMap::new(),
            words: Vec::new(),
        }
    }

    /// Look up a word by id.
    #[must_use]
    pub fn word(&self, id: &str) -> Option<&WordPlacement> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn word_mut(&mut self, id: &str) -> Option<&mut WordPlacement> {
        self.words.iter_mut().find(|w| w.id == id)
    }

    /// Position of a word in the chain.
    #[must_use]
    pub fn word_index(&self, id: &str) -> Option<usize> {
        self.words.iter().position(|w| w.id == id)
    }

    /// Where the layer comment is drawn: `comment_pos` when set, otherwise
    /// three rows above the top-left of the words' bounding box (or
    /// `(0, -3)` for an empty layer).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn comment_anchor(&self) -> Point {
        if let Some(pos) = self.comment_pos {
            return pos;
        }
        let mut cells = self.words.iter().flat_map(footprint);
        let Some(first) = cells.next() else {
            return Point::new(0.0, -COMMENT_ANCHOR_LIFT);
        };
        let (min_x, min_y) = cells.fold((first.x, first.y), |(mx, my), c| (mx.min(c.x), my.min(c.y)));
        Point::new(min_x as f64, min_y as f64 - COMMENT_ANCHOR_LIFT)
    }
}

/// A structural problem found by [`Document::integrity_issues`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityIssue {
    #[error("root layer `{0}` is missing")]
    MissingRoot(LayerId),
    #[error("word `{word_id}` ladders to missing layer `{ladder_layer_id}`")]
    DanglingLadder { word_id: WordId, ladder_layer_id: LayerId },
    #[error("layer stored under `{key}` has id `{id}`")]
    LayerKeyMismatch { key: LayerId, id: LayerId },
    #[error("word `{word_id}` in layer `{layer_id}` claims layer `{claimed}`")]
    WordLayerMismatch { word_id: WordId, layer_id: LayerId, claimed: LayerId },
    #[error("layer `{layer_id}` is laddered from {parents} words")]
    MultipleParents { layer_id: LayerId, parents: usize },
}

/// The whole engram: every layer, flat, plus the root layer id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub root_layer_id: LayerId,
    pub layers_by_id: BTreeMap<LayerId, Layer>,
}

impl Document {
    /// A document holding a single empty root layer.
    #[must_use]
    pub fn new() -> Self {
        let mut layers_by_id = BTreeMap::new();
        layers_by_id.insert(ROOT_LAYER_ID.to_owned(), Layer::new(ROOT_LAYER_ID));
        Self { version: FORMAT_VERSION, root_layer_id: ROOT_LAYER_ID.to_owned(), layers_by_id }
    }

    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers_by_id.get(id)
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers_by_id.get_mut(id)
    }

    #[must_use]
    pub fn root(&self) -> Option<&Layer> {
        self.layer(&self.root_layer_id)
    }

    /// Total number of layers, reachable or not.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers_by_id.len()
    }

    /// The child layer a word ladders to, if the reference resolves.
    #[must_use]
    pub fn ladder_target(&self, word: &WordPlacement) -> Option<&Layer> {
        word.ladder_layer_id.as_deref().and_then(|id| self.layer(id))
    }

    /// Structural problems: missing root, dangling ladders, mismatched ids,
    /// and layers with more than one parent word. Empty for any document
    /// built only through the editor.
    #[must_use]
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        if !self.layers_by_id.contains_key(&self.root_layer_id) {
            issues.push(IntegrityIssue::MissingRoot(self.root_layer_id.clone()));
        }

        let mut parents: HashMap<&str, usize> = HashMap::new();
        for (key, layer) in &self.layers_by_id {
            if *key != layer.id {
                issues.push(IntegrityIssue::LayerKeyMismatch { key: key.clone(), id: layer.id.clone() });
            }
            for word in &layer.words {
                if word.layer_id != *key {
                    issues.push(IntegrityIssue::WordLayerMismatch {
                        word_id: word.id.clone(),
                        layer_id: key.clone(),
                        claimed: word.layer_id.clone(),
                    });
                }
                let Some(target) = word.ladder_layer_id.as_deref() else {
                    continue;
                };
                if self.layers_by_id.contains_key(target) {
                    *parents.entry(target).or_default() += 1;
                } else {
                    issues.push(IntegrityIssue::DanglingLadder {
                        word_id: word.id.clone(),
                        ladder_layer_id: target.to_owned(),
                    });
                }
            }
        }

        let mut shared: Vec<(&str, usize)> = parents.into_iter().filter(|(_, n)| *n > 1).collect();
        shared.sort_unstable();
        issues.extend(
            shared
                .into_iter()
                .map(|(layer_id, parents)| IntegrityIssue::MultipleParents { layer_id: layer_id.to_owned(), parents }),
        );
        issues
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

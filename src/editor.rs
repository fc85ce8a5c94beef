//! Editor state container: the current document, undo/redo history,
//! layer navigation, and the transient draft being typed.
//!
//! DESIGN
//! ======
//! The document is an immutable shared value. Every document mutation clones
//! the current snapshot, edits the clone, swaps it in, and records the
//! outgoing snapshot in [`History`]. Operations that would change nothing
//! (empty draft, unknown word, nothing to undo) return [`Change::None`] and
//! leave history untouched. Navigation, selection, facing and the draft are
//! editor state, not document state, and never enter history.
//!
//! Rendering and input layers sit on top: they call these operations and
//! re-read the queries at the bottom of the impl.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cells::rebuild_layer_cells;
use crate::dictionary::Dictionary;
use crate::doc::{Document, Layer, LayerId, WordId, WordPlacement, new_layer_id, new_word_id};
use crate::geometry::{Coord, Direction, Point};
use crate::graph::{EngramGraph, GraphNode, project_graph, route};
use crate::history::History;
use crate::serialize::{ExportError, ImportError, export_document, import_document, import_document_strict};
use crate::stability::{StabilityReport, score_layer};
use crate::validator::{ChainStep, chain_steps};

/// What an editor operation did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Nothing changed; no history entry was recorded.
    None,
    WordCommitted { layer_id: LayerId, word_id: WordId },
    WordDeleted { layer_id: LayerId, word_id: WordId },
    LadderCreated { word_id: WordId, layer_id: LayerId },
    /// The word's ladder reference was dropped. The child layer is kept.
    LadderRemoved { word_id: WordId, layer_id: LayerId },
    LayerUpdated { layer_id: LayerId },
    Undone,
    Redone,
    Imported,
    Reset,
}

impl Change {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Drafting state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftState {
    /// No cell is active.
    #[default]
    Idle,
    /// A word is being typed from `cell`.
    Drafting {
        /// Start cell of the word being typed.
        cell: Coord,
        /// Uppercase text typed so far.
        text: String,
    },
}

impl DraftState {
    /// The active cell, if drafting.
    #[must_use]
    pub fn cell(&self) -> Option<Coord> {
        match self {
            Self::Idle => None,
            Self::Drafting { cell, .. } => Some(*cell),
        }
    }

    /// The text typed so far; empty when idle.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Drafting { text, .. } => text,
        }
    }
}

/// Persistent editor UI state that is not part of the document.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Facing used for the next committed word.
    pub direction: Direction,
    /// The currently selected word, if any.
    pub selected_word: Option<WordId>,
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Round to two decimals, the precision comment anchors are stored at.
fn round_anchor(pos: Point) -> Point {
    Point::new((pos.x * 100.0).round() / 100.0, (pos.y * 100.0).round() / 100.0)
}

/// Whether `ch` may appear in a word.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == ' '
}

/// The editor core. All logic that doesn't depend on a renderer.
#[derive(Debug, Clone)]
pub struct EditorCore {
    doc: Rc<Document>,
    history: History,
    /// Breadcrumb trail of layer ids; never empty, top is the active layer.
    nav: Vec<LayerId>,
    draft: DraftState,
    pub ui: UiState,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::with_document(Document::new())
    }
}

impl EditorCore {
    /// An editor over a fresh document with one empty root layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor over `doc`, with empty history and navigation at its root.
    #[must_use]
    pub fn with_document(doc: Document) -> Self {
        let nav = vec![doc.root_layer_id.clone()];
        Self { doc: Rc::new(doc), history: History::new(), nav, draft: DraftState::Idle, ui: UiState::default() }
    }

    /// Apply `edit` to a copy of the current document. When `edit` reports a
    /// change, the copy becomes current and the old snapshot enters history.
    fn apply(&mut self, edit: impl FnOnce(&mut Document) -> bool) -> bool {
        let mut next = Document::clone(&self.doc);
        if !edit(&mut next) {
            return false;
        }
        let previous = std::mem::replace(&mut self.doc, Rc::new(next));
        self.history.record(previous);
        true
    }

    /// Swap in a whole new document, recording the old one.
    fn install(&mut self, doc: Document) {
        let previous = std::mem::replace(&mut self.doc, Rc::new(doc));
        self.history.record(previous);
        self.nav = vec![self.doc.root_layer_id.clone()];
        self.clear_transient();
    }

    fn clear_transient(&mut self) {
        self.draft = DraftState::Idle;
        self.ui.selected_word = None;
    }

    /// Drop navigation entries that no longer resolve in the current
    /// document, keeping at least the root.
    fn reconcile_nav(&mut self) {
        if let Some(missing) = self.nav.iter().position(|id| self.doc.layer(id).is_none()) {
            self.nav.truncate(missing);
        }
        if self.nav.is_empty() {
            self.nav.push(self.doc.root_layer_id.clone());
        }
    }

    // --- Drafting ---

    /// Make `cell` the active cell and start an empty draft there.
    pub fn begin_draft(&mut self, cell: Coord) {
        self.draft = DraftState::Drafting { cell, text: String::new() };
    }

    /// Append a character to the draft. The character is uppercased; only
    /// ASCII letters, digits and space are accepted. Returns false when idle or
    /// when the character is rejected.
    pub fn append_char(&mut self, ch: char) -> bool {
        let DraftState::Drafting { text, .. } = &mut self.draft else {
            return false;
        };
        if !is_word_char(ch) {
            return false;
        }
        text.push(ch.to_ascii_uppercase());
        true
    }

    /// Remove the last draft character. Returns false if there was none.
    pub fn backspace(&mut self) -> bool {
        match &mut self.draft {
            DraftState::Drafting { text, .. } => text.pop().is_some(),
            DraftState::Idle => false,
        }
    }

    /// Abandon the draft without touching the document.
    pub fn cancel_draft(&mut self) {
        self.draft = DraftState::Idle;
    }

    /// Switch the facing used for the next committed word.
    pub fn toggle_direction(&mut self) -> Direction {
        self.ui.direction = self.ui.direction.toggled();
        self.ui.direction
    }

    /// Place the draft as a new word at the end of the active layer's chain.
    ///
    /// No-op when idle, when the draft is empty, or when the active layer
    /// does not resolve.
    pub fn commit_draft(&mut self) -> Change {
        let (cell, text) = match &self.draft {
            DraftState::Drafting { cell, text } if !text.is_empty() => (*cell, text.clone()),
            _ => return Change::None,
        };

        let layer_id = self.active_layer_id().to_owned();
        let word = WordPlacement {
            id: new_word_id(),
            layer_id: layer_id.clone(),
            created_at: now_ms(),
            start: cell,
            direction: self.ui.direction,
            text,
            ladder_layer_id: None,
        };
        let word_id = word.id.clone();

        let applied = self.apply(|doc| {
            let Some(layer) = doc.layer_mut(&layer_id) else {
                return false;
            };
            layer.words.push(word);
            rebuild_layer_cells(layer);
            true
        });
        if !applied {
            return Change::None;
        }

        self.draft = DraftState::Idle;
        tracing::debug!(%layer_id, %word_id, "word committed");
        Change::WordCommitted { layer_id, word_id }
    }

    // --- Words and ladders ---

    /// Select a word, or clear the selection with `None`.
    pub fn select_word(&mut self, word_id: Option<WordId>) {
        self.ui.selected_word = word_id;
    }

    /// Add or remove the ladder of a word in the active layer.
    ///
    /// Enabling creates a new empty layer named after the word. Disabling
    /// only drops the reference; the child layer stays in the document.
    pub fn toggle_ladder(&mut self, word_id: &str) -> Change {
        let layer_id = self.active_layer_id().to_owned();
        let Some(word) = self.doc.layer(&layer_id).and_then(|l| l.word(word_id)) else {
            return Change::None;
        };
        let existing = word.ladder_layer_id.clone();
        let name = word.text.clone();

        if let Some(child_id) = existing {
            self.apply(|doc| {
                let Some(word) = doc.layer_mut(&layer_id).and_then(|l| l.word_mut(word_id)) else {
                    return false;
                };
                word.ladder_layer_id = None;
                true
            });
            tracing::debug!(%word_id, layer_id = %child_id, "ladder removed");
            return Change::LadderRemoved { word_id: word_id.to_owned(), layer_id: child_id };
        }

        let child_id = new_layer_id();
        self.apply(|doc| {
            let Some(word) = doc.layer_mut(&layer_id).and_then(|l| l.word_mut(word_id)) else {
                return false;
            };
            word.ladder_layer_id = Some(child_id.clone());
            let mut child = Layer::new(child_id.clone());
            child.name = Some(name);
            doc.layers_by_id.insert(child_id.clone(), child);
            true
        });
        tracing::debug!(%word_id, layer_id = %child_id, "ladder created");
        Change::LadderCreated { word_id: word_id.to_owned(), layer_id: child_id }
    }

    /// Remove a word from the active layer. Its child layer, if any, is kept.
    pub fn delete_word(&mut self, word_id: &str) -> Change {
        let layer_id = self.active_layer_id().to_owned();
        let applied = self.apply(|doc| {
            let Some(layer) = doc.layer_mut(&layer_id) else {
                return false;
            };
            let Some(index) = layer.word_index(word_id) else {
                return false;
            };
            layer.words.remove(index);
            rebuild_layer_cells(layer);
            true
        });
        if !applied {
            return Change::None;
        }

        if self.ui.selected_word.as_deref() == Some(word_id) {
            self.ui.selected_word = None;
        }
        tracing::debug!(%layer_id, %word_id, "word deleted");
        Change::WordDeleted { layer_id, word_id: word_id.to_owned() }
    }

    // --- Layer comments ---

    /// Set (`Some`) or clear (`None`) the comment of any layer.
    pub fn set_layer_comment(&mut self, layer_id: &str, comment: Option<String>) -> Change {
        let applied = self.apply(|doc| {
            let Some(layer) = doc.layer_mut(layer_id) else {
                return false;
            };
            layer.comment = comment;
            true
        });
        if applied { Change::LayerUpdated { layer_id: layer_id.to_owned() } } else { Change::None }
    }

    /// Set (`Some`) or clear (`None`) the comment anchor of any layer.
    /// Anchors are stored rounded to two decimals.
    pub fn set_layer_comment_anchor(&mut self, layer_id: &str, pos: Option<Point>) -> Change {
        let applied = self.apply(|doc| {
            let Some(layer) = doc.layer_mut(layer_id) else {
                return false;
            };
            layer.comment_pos = pos.map(round_anchor);
            true
        });
        if applied { Change::LayerUpdated { layer_id: layer_id.to_owned() } } else { Change::None }
    }

    // --- Navigation ---

    /// Push `layer_id` onto the breadcrumb trail and make it active.
    /// Returns false (and does nothing) for an unknown layer.
    pub fn enter_layer(&mut self, layer_id: &str) -> bool {
        if self.doc.layer(layer_id).is_none() {
            return false;
        }
        self.nav.push(layer_id.to_owned());
        self.draft = DraftState::Idle;
        true
    }

    /// Enter the child layer of a word in the active layer.
    pub fn enter_ladder(&mut self, word_id: &str) -> bool {
        let Some(child_id) = self
            .active_layer()
            .and_then(|l| l.word(word_id))
            .and_then(|w| w.ladder_layer_id.clone())
        else {
            return false;
        };
        self.enter_layer(&child_id)
    }

    /// Pop the active layer off the breadcrumb trail. The last entry is
    /// never popped.
    pub fn navigate_back(&mut self) -> bool {
        if self.nav.len() <= 1 {
            return false;
        }
        self.nav.pop();
        self.draft = DraftState::Idle;
        true
    }

    // --- History ---

    /// Restore the previous document snapshot.
    pub fn undo(&mut self) -> Change {
        let Some(previous) = self.history.undo(Rc::clone(&self.doc)) else {
            return Change::None;
        };
        self.doc = previous;
        self.clear_transient();
        self.reconcile_nav();
        tracing::debug!(undo_depth = self.history.undo_depth(), "undo");
        Change::Undone
    }

    /// Restore the most recently undone snapshot.
    pub fn redo(&mut self) -> Change {
        let Some(next) = self.history.redo(Rc::clone(&self.doc)) else {
            return Change::None;
        };
        self.doc = next;
        self.clear_transient();
        self.reconcile_nav();
        tracing::debug!(redo_depth = self.history.redo_depth(), "redo");
        Change::Redone
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Persistence ---

    /// Replace the document with a parsed one. On error nothing changes.
    pub fn import(&mut self, json: &str) -> Result<Change, ImportError> {
        let doc = import_document(json)?;
        self.load_document(doc);
        Ok(Change::Imported)
    }

    /// Like [`EditorCore::import`], rejecting documents with integrity issues.
    pub fn import_strict(&mut self, json: &str) -> Result<Change, ImportError> {
        let doc = import_document_strict(json)?;
        self.load_document(doc);
        Ok(Change::Imported)
    }

    /// Replace the document with an already-parsed one, recording the
    /// outgoing document and resetting navigation to the new root.
    pub fn load_document(&mut self, doc: Document) {
        tracing::debug!(layers = doc.layer_count(), root = %doc.root_layer_id, "document loaded");
        self.install(doc);
    }

    /// Serialize the current document.
    pub fn export(&self) -> Result<String, ExportError> {
        export_document(&self.doc)
    }

    /// Replace the document with a single empty root layer.
    pub fn reset(&mut self) -> Change {
        self.install(Document::new());
        tracing::debug!("document reset");
        Change::Reset
    }

    // --- Queries ---

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Id of the layer being edited.
    #[must_use]
    pub fn active_layer_id(&self) -> &str {
        self.nav.last().map_or(self.doc.root_layer_id.as_str(), String::as_str)
    }

    #[must_use]
    pub fn active_layer(&self) -> Option<&Layer> {
        self.doc.layer(self.active_layer_id())
    }

    /// Breadcrumb trail from the root to the active layer.
    #[must_use]
    pub fn nav_stack(&self) -> &[LayerId] {
        &self.nav
    }

    #[must_use]
    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_word.as_deref()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.ui.direction
    }

    /// Stability of the active layer.
    #[must_use]
    pub fn stability(&self, dictionary: &Dictionary) -> StabilityReport {
        score_layer(&self.doc, self.active_layer_id(), dictionary)
    }

    /// Step listing of the active layer.
    #[must_use]
    pub fn steps(&self) -> Vec<ChainStep> {
        self.active_layer().map(chain_steps).unwrap_or_default()
    }

    /// Projected graph of the whole document.
    #[must_use]
    pub fn graph(&self) -> EngramGraph {
        project_graph(&self.doc)
    }

    /// Route through the selected word over the projected graph; empty
    /// without a selection.
    #[must_use]
    pub fn route(&self) -> Vec<GraphNode> {
        let Some(word_id) = self.selection() else {
            return Vec::new();
        };
        route(&self.graph(), word_id).into_iter().cloned().collect()
    }
}

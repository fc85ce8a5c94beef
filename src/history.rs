//! Undo/redo history of whole-document snapshots.
//!
//! Snapshots are shared immutable values (`Rc<Document>`): pushing the
//! current document never copies it, and no later mutation can reach a
//! snapshot already on either stack.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::rc::Rc;

use crate::doc::Document;

/// Past and future document snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Older states, most recent last.
    past: Vec<Rc<Document>>,
    /// Undone states, soonest redo last.
    future: Vec<Rc<Document>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `previous` as the state before a new mutation and drop any
    /// redoable states.
    pub fn record(&mut self, previous: Rc<Document>) {
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back from `current`. Returns the restored snapshot, or `None`
    /// (leaving both stacks untouched) when there is nothing to undo.
    pub fn undo(&mut self, current: Rc<Document>) -> Option<Rc<Document>> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward from `current`. Returns the restored snapshot, or `None`
    /// when there is nothing to redo.
    pub fn redo(&mut self, current: Rc<Document>) -> Option<Rc<Document>> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable steps.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable steps.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

use super::*;
use crate::doc::Layer;

fn doc_named(root: &str) -> Rc<Document> {
    let mut doc = Document::new();
    doc.root_layer_id = root.to_owned();
    doc.layers_by_id.insert(root.to_owned(), Layer::new(root));
    Rc::new(doc)
}

#[test]
fn new_history_is_empty() {
    let history = History::new();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn undo_on_empty_history_returns_none() {
    let mut history = History::new();
    assert!(history.undo(doc_named("a")).is_none());
    assert!(!history.can_redo());
}

#[test]
fn redo_on_empty_future_returns_none() {
    let mut history = History::new();
    history.record(doc_named("a"));
    assert!(history.redo(doc_named("b")).is_none());
    assert_eq!(history.undo_depth(), 1);
}

#[test]
fn undo_then_redo_walks_snapshots() {
    let mut history = History::new();
    history.record(doc_named("a"));
    history.record(doc_named("b"));
    let current = doc_named("c");

    let restored = history.undo(current).unwrap();
    assert_eq!(restored.root_layer_id, "b");
    let restored = history.undo(restored).unwrap();
    assert_eq!(restored.root_layer_id, "a");
    assert_eq!(history.redo_depth(), 2);

    let next = history.redo(restored).unwrap();
    assert_eq!(next.root_layer_id, "b");
    let next = history.redo(next).unwrap();
    assert_eq!(next.root_layer_id, "c");
    assert!(!history.can_redo());
    assert_eq!(history.undo_depth(), 2);
}

#[test]
fn recording_clears_future() {
    let mut history = History::new();
    history.record(doc_named("a"));
    let restored = history.undo(doc_named("b")).unwrap();
    assert!(history.can_redo());

    history.record(restored);
    assert!(!history.can_redo());
}

#[test]
fn snapshots_are_shared_not_copied() {
    let mut history = History::new();
    let doc = doc_named("a");
    history.record(Rc::clone(&doc));
    let restored = history.undo(doc_named("b")).unwrap();
    assert!(Rc::ptr_eq(&doc, &restored));
}

use super::*;
use crate::doc::WordPlacement;
use crate::geometry::{Coord, Direction};

fn word(id: &str, layer_id: &str, text: &str, ladder: Option<&str>) -> WordPlacement {
    WordPlacement {
        id: id.to_owned(),
        layer_id: layer_id.to_owned(),
        created_at: 0,
        start: Coord::new(0, 0),
        direction: Direction::Across,
        text: text.to_owned(),
        ladder_layer_id: ladder.map(str::to_owned),
    }
}

fn doc_with(layers: Vec<(&str, Vec<WordPlacement>)>) -> Document {
    let mut doc = Document::new();
    for (id, words) in layers {
        let mut layer = Layer::new(id);
        layer.words = words;
        doc.layers_by_id.insert(id.to_owned(), layer);
    }
    doc
}

#[test]
fn empty_document_has_no_roots() {
    assert!(outline(&Document::new()).is_empty());
}

#[test]
fn ladders_nest_child_words() {
    let doc = doc_with(vec![
        ("root", vec![word("engine", "root", "ENGINE", Some("l1")), word("wheel", "root", "WHEEL", None)]),
        ("l1", vec![word("spark", "l1", "SPARK", Some("l2"))]),
        ("l2", vec![word("coil", "l2", "COIL", None)]),
    ]);
    let roots = outline(&doc);

    assert_eq!(roots.len(), 2);
    assert!(roots[0].is_ladder);
    assert_eq!(roots[0].children.len(), 1);
    assert_eq!(roots[0].children[0].text, "SPARK");
    assert_eq!(roots[0].children[0].depth, 1);
    assert_eq!(roots[0].children[0].children[0].text, "COIL");
    assert_eq!(roots[0].children[0].children[0].layer_id, "l2");
    assert!(roots[1].children.is_empty());
}

#[test]
fn dangling_and_cyclic_ladders_become_leaves() {
    let doc = doc_with(vec![
        ("root", vec![word("a", "root", "A", Some("ghost")), word("b", "root", "B", Some("l1"))]),
        ("l1", vec![word("c", "l1", "C", Some("root"))]),
    ]);
    let roots = outline(&doc);

    assert!(roots[0].is_ladder);
    assert!(roots[0].children.is_empty());
    assert_eq!(roots[1].children.len(), 1);
    assert!(roots[1].children[0].children.is_empty());
}

#[test]
fn shared_child_expands_under_each_parent() {
    let doc = doc_with(vec![
        ("root", vec![word("engine", "root", "ENGINE", Some("l1")), word("motor", "root", "MOTOR", Some("l1"))]),
        ("l1", vec![word("spark", "l1", "SPARK", None)]),
    ]);
    let roots = outline(&doc);
    assert_eq!(roots[0].children[0].text, "SPARK");
    assert_eq!(roots[1].children[0].text, "SPARK");
    assert_eq!(render_outline(&roots), "+ ENGINE\n  - SPARK\n+ MOTOR\n  - SPARK\n");
}

#[test]
fn render_indents_by_depth() {
    let doc = doc_with(vec![
        ("root", vec![word("engine", "root", "ENGINE", Some("l1")), word("wheel", "root", "WHEEL", None)]),
        ("l1", vec![word("spark", "l1", "SPARK", None)]),
    ]);
    assert_eq!(render_outline(&outline(&doc)), "+ ENGINE\n  - SPARK\n- WHEEL\n");
}

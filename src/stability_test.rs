use super::*;
use crate::doc::{Layer, WordPlacement};
use crate::geometry::{Coord, Direction};

fn word(id: &str, x: i64, y: i64, direction: Direction, text: &str) -> WordPlacement {
    WordPlacement {
        id: id.to_owned(),
        layer_id: "root".to_owned(),
        created_at: 0,
        start: Coord::new(x, y),
        direction,
        text: text.to_owned(),
        ladder_layer_id: None,
    }
}

fn doc_with_root_words(words: Vec<WordPlacement>) -> Document {
    let mut doc = Document::new();
    if let Some(root) = doc.layer_mut("root") {
        root.words = words;
    }
    doc
}

fn add_layer(doc: &mut Document, id: &str) {
    doc.layers_by_id.insert(id.to_owned(), Layer::new(id));
}

// =============================================================
// Tiers
// =============================================================

#[test]
fn tier_thresholds_are_strict() {
    let cases = [
        (0, StabilityStatus::Fragmented),
        (500, StabilityStatus::Fragmented),
        (501, StabilityStatus::Coherent),
        (2_000, StabilityStatus::Coherent),
        (2_001, StabilityStatus::Stable),
        (5_000, StabilityStatus::Stable),
        (5_001, StabilityStatus::Crystallized),
        (10_000, StabilityStatus::Crystallized),
        (10_001, StabilityStatus::Ascended),
    ];
    for (score, expected) in cases {
        assert_eq!(StabilityStatus::for_score(score), expected, "score {score}");
    }
}

#[test]
fn status_labels_and_serde_are_uppercase() {
    assert_eq!(StabilityStatus::Crystallized.to_string(), "CRYSTALLIZED");
    assert_eq!(serde_json::to_string(&StabilityStatus::Empty).unwrap(), "\"EMPTY\"");
    let back: StabilityStatus = serde_json::from_str("\"ASCENDED\"").unwrap();
    assert_eq!(back, StabilityStatus::Ascended);
}

// =============================================================
// score_layer
// =============================================================

#[test]
fn empty_layer_scores_zero() {
    let doc = Document::new();
    let report = score_layer(&doc, "root", &Dictionary::new());
    assert_eq!(report, StabilityReport { score: 0, status: StabilityStatus::Empty });
}

#[test]
fn missing_layer_scores_as_empty() {
    let doc = Document::new();
    let report = score_layer(&doc, "nope", &Dictionary::new());
    assert_eq!(report.status, StabilityStatus::Empty);
    assert_eq!(report.score, 0);
}

#[test]
fn single_word_scores_base_plus_length() {
    let doc = doc_with_root_words(vec![word("cat", 0, 0, Direction::Across, "CAT")]);
    let report = score_layer(&doc, "root", &Dictionary::new());
    assert_eq!(report.score, 130);
    assert_eq!(report.status, StabilityStatus::Fragmented);
}

#[test]
fn dictionary_word_earns_bonus() {
    let doc = doc_with_root_words(vec![word("cat", 0, 0, Direction::Across, "CAT")]);
    let dict = Dictionary::from_word_list("cat\ndog");
    let report = score_layer(&doc, "root", &dict);
    assert_eq!(report.score, 630);
    assert_eq!(report.status, StabilityStatus::Coherent);
}

#[test]
fn extra_interlock_beyond_first_cell_is_rewarded() {
    let doc = doc_with_root_words(vec![
        word("house", 0, 0, Direction::Across, "HOUSE"),
        word("used", 2, 0, Direction::Across, "USED"),
    ]);
    // 150 + (140 + 2 * 150)
    assert_eq!(score_layer(&doc, "root", &Dictionary::new()).score, 590);
}

#[test]
fn single_crossing_earns_no_interlock_bonus() {
    let doc = doc_with_root_words(vec![
        word("cat", 0, 0, Direction::Across, "CAT"),
        word("top", 2, 0, Direction::Down, "TOP"),
    ]);
    assert_eq!(score_layer(&doc, "root", &Dictionary::new()).score, 260);
}

#[test]
fn broken_chain_is_penalized_and_clamped() {
    let doc = doc_with_root_words(vec![
        word("cat", 0, 0, Direction::Across, "CAT"),
        word("dog", 9, 9, Direction::Across, "DOG"),
    ]);
    let report = score_layer(&doc, "root", &Dictionary::from_word_list("DOG"));
    assert_eq!(report.score, 0);
    assert_eq!(report.status, StabilityStatus::Fragmented);
}

#[test]
fn ladder_word_and_extra_layer_both_count() {
    let mut w = word("cat", 0, 0, Direction::Across, "CAT");
    w.ladder_layer_id = Some("child".to_owned());
    let mut doc = doc_with_root_words(vec![w]);
    add_layer(&mut doc, "child");

    let report = score_layer(&doc, "root", &Dictionary::new());
    assert_eq!(report.score, 130 + 1000 + 2000);
    assert_eq!(report.status, StabilityStatus::Stable);
}

#[test]
fn nested_layer_bonus_can_outweigh_penalties() {
    let mut doc = doc_with_root_words(vec![
        word("cat", 0, 0, Direction::Across, "CAT"),
        word("dog", 9, 9, Direction::Across, "DOG"),
    ]);
    add_layer(&mut doc, "a");
    add_layer(&mut doc, "b");
    assert_eq!(score_layer(&doc, "root", &Dictionary::new()).score, 130 - 500 + 4000);
}

#[test]
fn invalid_ladder_word_gets_no_ladder_bonus() {
    let mut far = word("far", 9, 9, Direction::Across, "FAR");
    far.ladder_layer_id = Some("child".to_owned());
    let mut doc = doc_with_root_words(vec![word("cat", 0, 0, Direction::Across, "CAT"), far]);
    add_layer(&mut doc, "child");
    assert_eq!(score_layer(&doc, "root", &Dictionary::new()).score, 130 - 500 + 2000);
}

#[test]
fn scoring_is_idempotent() {
    let doc = doc_with_root_words(vec![
        word("cat", 0, 0, Direction::Across, "CAT"),
        word("top", 2, 0, Direction::Down, "TOP"),
    ]);
    let dict = Dictionary::from_word_list("CAT\nTOP");
    assert_eq!(score_layer(&doc, "root", &dict), score_layer(&doc, "root", &dict));
}

#[test]
fn ladder_strictly_increases_score() {
    let dict = Dictionary::from_word_list("CAT");

    let mut plain = doc_with_root_words(vec![word("cat", 0, 0, Direction::Across, "CAT")]);
    add_layer(&mut plain, "child");

    let mut laddered_word = word("cat", 0, 0, Direction::Across, "CAT");
    laddered_word.ladder_layer_id = Some("child".to_owned());
    let mut laddered = doc_with_root_words(vec![laddered_word]);
    add_layer(&mut laddered, "child");

    assert!(score_layer(&laddered, "root", &dict).score > score_layer(&plain, "root", &dict).score);
}

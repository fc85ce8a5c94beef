#![allow(clippy::float_cmp)]

use super::*;

fn word(x: i64, y: i64, direction: Direction, text: &str) -> WordPlacement {
    WordPlacement {
        id: format!("w-{text}"),
        layer_id: "root".to_owned(),
        created_at: 0,
        start: Coord::new(x, y),
        direction,
        text: text.to_owned(),
        ladder_layer_id: None,
    }
}

// =============================================================
// coord_key
// =============================================================

#[test]
fn coord_key_is_deterministic() {
    assert_eq!(coord_key(3, -4), coord_key(3, -4));
    assert_eq!(coord_key(3, -4), "3,-4");
}

#[test]
fn coord_key_distinguishes_neighbours() {
    let keys = [coord_key(1, 23), coord_key(12, 3), coord_key(-1, 23), coord_key(1, -23)];
    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn coord_method_key_matches_free_function() {
    assert_eq!(Coord::new(-7, 9).key(), coord_key(-7, 9));
}

// =============================================================
// Direction
// =============================================================

#[test]
fn direction_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Direction::Across).unwrap(), "\"across\"");
    assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"down\"");
    assert!(serde_json::from_str::<Direction>("\"diagonal\"").is_err());
}

#[test]
fn direction_toggles_both_ways() {
    assert_eq!(Direction::Across.toggled(), Direction::Down);
    assert_eq!(Direction::Down.toggled(), Direction::Across);
    assert_eq!(Direction::default(), Direction::Across);
}

// =============================================================
// footprint
// =============================================================

#[test]
fn footprint_across_steps_x() {
    let cells = footprint(&word(2, 5, Direction::Across, "CAT"));
    assert_eq!(cells, vec![Coord::new(2, 5), Coord::new(3, 5), Coord::new(4, 5)]);
}

#[test]
fn footprint_down_steps_y() {
    let cells = footprint(&word(-1, -1, Direction::Down, "DOG"));
    assert_eq!(cells, vec![Coord::new(-1, -1), Coord::new(-1, 0), Coord::new(-1, 1)]);
}

#[test]
fn footprint_length_matches_text_and_steps_by_one() {
    for direction in [Direction::Across, Direction::Down] {
        let w = word(10, -3, direction, "ENGRAM WORDS");
        let cells = footprint(&w);
        assert_eq!(cells.len(), w.text.len());
        for pair in cells.windows(2) {
            let (dx, dy) = (pair[1].x - pair[0].x, pair[1].y - pair[0].y);
            assert_eq!((dx, dy), direction.step());
        }
    }
}

#[test]
fn footprint_chars_pairs_cells_with_letters() {
    let w = word(0, 0, Direction::Down, "HI");
    let pairs: Vec<_> = footprint_chars(&w).collect();
    assert_eq!(pairs, vec![(Coord::new(0, 0), 'H'), (Coord::new(0, 1), 'I')]);
}

// =============================================================
// overlap
// =============================================================

#[test]
fn crossing_words_share_one_cell() {
    let a = word(0, 0, Direction::Across, "CAT");
    let b = word(1, -1, Direction::Down, "BAD");
    assert_eq!(overlap_count(&a, &b), 1);
    assert!(intersects(&a, &b));
}

#[test]
fn parallel_words_can_share_several_cells() {
    let a = word(0, 0, Direction::Across, "HOUSE");
    let b = word(2, 0, Direction::Across, "USED");
    assert_eq!(overlap_count(&a, &b), 3);
    assert_eq!(overlap_count(&b, &a), 3);
}

#[test]
fn disjoint_words_do_not_intersect() {
    let a = word(0, 0, Direction::Across, "CAT");
    let b = word(0, 2, Direction::Across, "DOG");
    assert_eq!(overlap_count(&a, &b), 0);
    assert!(!intersects(&a, &b));
}

// =============================================================
// word_center
// =============================================================

#[test]
fn center_of_across_word_is_midpoint() {
    let c = word_center(&word(0, 0, Direction::Across, "CAT"));
    assert_eq!(c, Point::new(1.0, 0.0));
}

#[test]
fn center_of_even_down_word_falls_between_cells() {
    let c = word_center(&word(4, 1, Direction::Down, "GRID"));
    assert_eq!(c, Point::new(4.0, 2.5));
}

#[test]
fn center_of_single_letter_is_its_cell() {
    let c = word_center(&word(-3, 7, Direction::Across, "A"));
    assert_eq!(c, Point::new(-3.0, 7.0));
}

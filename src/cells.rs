//! Cell index rebuild.
//!
//! The cell index is derived data. It is rebuilt in full from a layer's word
//! list after every structural change; it is never patched incrementally.

#[cfg(test)]
#[path = "cells_test.rs"]
mod cells_test;

use std::collections::BTreeMap;

use crate::doc::{Cell, Layer, WordPlacement};
use crate::geometry::footprint_chars;

/// Build the coordinate-key → cell map for `words`.
///
/// Later words overwrite the character of earlier words at shared cells.
/// Each cell lists every covering word id exactly once.
#[must_use]
pub fn build_cells(words: &[WordPlacement]) -> BTreeMap<String, Cell> {
    let mut cells: BTreeMap<String, Cell> = BTreeMap::new();
    for word in words {
        for (coord, ch) in footprint_chars(word) {
            let cell = cells
                .entry(coord.key())
                .or_insert_with(|| Cell { coord, ch, word_ids: Vec::new() });
            cell.ch = ch;
            if !cell.word_ids.contains(&word.id) {
                cell.word_ids.push(word.id.clone());
            }
        }
    }
    cells
}

/// Replace the layer's cell index with one rebuilt from its words.
pub fn rebuild_layer_cells(layer: &mut Layer) {
    layer.cells_by_key = build_cells(&layer.words);
}

//! Single-path chain validation.
//!
//! A layer's words must form one chain in insertion order: every word after
//! the first shares at least one cell with the word placed just before it.
//! The first break invalidates that word and every word after it.

#[cfg(test)]
#[path = "validator_test.rs"]
mod validator_test;

use std::collections::HashSet;

use crate::doc::{Document, Layer, WordId, WordPlacement};
use crate::geometry::{Coord, footprint, intersects};

/// Ids of the words in `words` that break the chain.
///
/// `words[0]` is always valid. Character conflicts at shared cells are not
/// reported here.
#[must_use]
pub fn invalid_word_ids(words: &[WordPlacement]) -> HashSet<WordId> {
    let mut invalid = HashSet::new();
    let mut broken = false;
    let mut prev_cells: Option<HashSet<Coord>> = None;

    for word in words {
        let cells = footprint(word);
        if let Some(prev) = &prev_cells {
            if broken || !cells.iter().any(|c| prev.contains(c)) {
                broken = true;
                invalid.insert(word.id.clone());
            }
        }
        prev_cells = Some(cells.into_iter().collect());
    }
    invalid
}

/// One link of a layer's chain, as shown in a step listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    /// 1-based position in the chain.
    pub step: usize,
    pub word_id: WordId,
    pub text: String,
    pub valid: bool,
    pub has_ladder: bool,
}

/// The layer's words with their step numbers and validity.
#[must_use]
pub fn chain_steps(layer: &Layer) -> Vec<ChainStep> {
    let invalid = invalid_word_ids(&layer.words);
    layer
        .words
        .iter()
        .enumerate()
        .map(|(i, word)| ChainStep {
            step: i + 1,
            word_id: word.id.clone(),
            text: word.text.clone(),
            valid: !invalid.contains(&word.id),
            has_ladder: word.has_ladder(),
        })
        .collect()
}

/// Text report of a whole document: for each layer, one `OK a -> b` or
/// `BROKEN a -> b` line per adjacent pair (or `(empty)`), then one
/// `issue: ...` line per integrity issue.
#[must_use]
pub fn validation_report(doc: &Document) -> String {
    let mut out = String::new();
    for (layer_id, layer) in &doc.layers_by_id {
        out.push_str(&format!("layer {layer_id}\n"));
        if layer.words.is_empty() {
            out.push_str("  (empty)\n");
            continue;
        }
        for pair in layer.words.windows(2) {
            let verdict = if intersects(&pair[0], &pair[1]) { "OK" } else { "BROKEN" };
            out.push_str(&format!("  {verdict} {} -> {}\n", pair[0].text, pair[1].text));
        }
    }
    for issue in doc.integrity_issues() {
        out.push_str(&format!("issue: {issue}\n"));
    }
    out
}

//! Stability scoring: a gamified measure of one layer's chain quality.
//!
//! The score is layer-local except for one global term: every layer in the
//! document beyond the root adds [`NESTED_LAYER_BONUS`], whichever layer is
//! being scored. The final score is clamped at zero and the status tier is
//! read off the clamped score, so no tier below [`StabilityStatus::Fragmented`]
//! exists for a non-empty layer.

#[cfg(test)]
#[path = "stability_test.rs"]
mod stability_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DICTIONARY_BONUS, EXTRA_INTERLOCK_BONUS, INVALID_WORD_PENALTY, LADDER_BONUS, NESTED_LAYER_BONUS, PER_CHAR_SCORE,
    WORD_BASE_SCORE,
};
use crate::dictionary::Dictionary;
use crate::doc::Document;
use crate::geometry::overlap_count;
use crate::validator::invalid_word_ids;

/// Discrete stability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilityStatus {
    /// The layer has no words (or does not exist).
    Empty,
    /// Score of 500 or less.
    Fragmented,
    /// Score above 500.
    Coherent,
    /// Score above 2000.
    Stable,
    /// Score above 5000.
    Crystallized,
    /// Score above 10000.
    Ascended,
}

impl StabilityStatus {
    /// Tier for a clamped, non-negative score.
    #[must_use]
    pub fn for_score(score: i64) -> Self {
        match score {
            s if s > 10_000 => Self::Ascended,
            s if s > 5_000 => Self::Crystallized,
            s if s > 2_000 => Self::Stable,
            s if s > 500 => Self::Coherent,
            _ => Self::Fragmented,
        }
    }

    /// Upper-case display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Fragmented => "FRAGMENTED",
            Self::Coherent => "COHERENT",
            Self::Stable => "STABLE",
            Self::Crystallized => "CRYSTALLIZED",
            Self::Ascended => "ASCENDED",
        }
    }
}

impl fmt::Display for StabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityReport {
    /// Clamped score, never negative.
    pub score: i64,
    pub status: StabilityStatus,
}

impl StabilityReport {
    const EMPTY: Self = Self { score: 0, status: StabilityStatus::Empty };
}

fn as_score(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Score the layer `layer_id` of `doc` against `dictionary`.
///
/// A missing or empty layer scores 0 with status [`StabilityStatus::Empty`].
#[must_use]
pub fn score_layer(doc: &Document, layer_id: &str, dictionary: &Dictionary) -> StabilityReport {
    let Some(layer) = doc.layer(layer_id) else {
        return StabilityReport::EMPTY;
    };
    if layer.words.is_empty() {
        return StabilityReport::EMPTY;
    }

    let invalid = invalid_word_ids(&layer.words);
    let mut score: i64 = 0;
    for (index, word) in layer.words.iter().enumerate() {
        if invalid.contains(&word.id) {
            score -= INVALID_WORD_PENALTY;
            continue;
        }

        score += WORD_BASE_SCORE + PER_CHAR_SCORE * as_score(word.len());
        if dictionary.contains(&word.text) {
            score += DICTIONARY_BONUS;
        }
        if index > 0 {
            let shared = overlap_count(word, &layer.words[index - 1]);
            if shared > 1 {
                score += as_score(shared - 1) * EXTRA_INTERLOCK_BONUS;
            }
        }
        if word.has_ladder() {
            score += LADDER_BONUS;
        }
    }

    score += as_score(doc.layer_count().saturating_sub(1)) * NESTED_LAYER_BONUS;

    let score = score.max(0);
    StabilityReport { score, status: StabilityStatus::for_score(score) }
}

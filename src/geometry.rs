//! Grid geometry: coordinates, facing, word footprints and centers.
//!
//! Everything here is pure. A word occupies one cell per character, starting
//! at its `start` cell and stepping one cell right (`Across`) or one cell down
//! (`Down`) per character.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::doc::WordPlacement;

/// An integer cell on the unbounded grid lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Canonical string key for this cell. See [`coord_key`].
    #[must_use]
    pub fn key(self) -> String {
        coord_key(self.x, self.y)
    }
}

/// A real-valued point in grid space (word centers, comment anchors).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The facing of a word on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// x increases per character.
    #[default]
    Across,
    /// y increases per character.
    Down,
}

impl Direction {
    /// Per-character step `(dx, dy)`.
    #[must_use]
    pub fn step(self) -> (i64, i64) {
        match self {
            Self::Across => (1, 0),
            Self::Down => (0, 1),
        }
    }

    /// The other facing.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }
}

/// Canonical key for the cell `(x, y)`: `"x,y"`.
///
/// Injective over the integer lattice since the comma never occurs inside a
/// formatted integer.
#[must_use]
pub fn coord_key(x: i64, y: i64) -> String {
    format!("{x},{y}")
}

/// Cell of the `index`-th character of a word starting at `start`.
fn cell_at(start: Coord, direction: Direction, index: i64) -> Coord {
    let (dx, dy) = direction.step();
    Coord::new(start.x + dx * index, start.y + dy * index)
}

/// The ordered cells covered by `word`, one per character.
#[must_use]
pub fn footprint(word: &WordPlacement) -> Vec<Coord> {
    (0_i64..)
        .zip(word.text.chars())
        .map(|(i, _)| cell_at(word.start, word.direction, i))
        .collect()
}

/// The ordered `(cell, character)` pairs covered by `word`.
pub fn footprint_chars(word: &WordPlacement) -> impl Iterator<Item = (Coord, char)> + '_ {
    (0_i64..)
        .zip(word.text.chars())
        .map(|(i, ch)| (cell_at(word.start, word.direction, i), ch))
}

/// Number of cells shared by the footprints of `a` and `b`.
#[must_use]
pub fn overlap_count(a: &WordPlacement, b: &WordPlacement) -> usize {
    let cells: HashSet<Coord> = footprint(a).into_iter().collect();
    footprint(b).iter().filter(|c| cells.contains(c)).count()
}

/// Whether the footprints of `a` and `b` share at least one cell.
#[must_use]
pub fn intersects(a: &WordPlacement, b: &WordPlacement) -> bool {
    overlap_count(a, b) > 0
}

/// Midpoint of the first and last cells of `word`.
///
/// An empty text degenerates to the start cell.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn word_center(word: &WordPlacement) -> Point {
    let len = i64::try_from(word.text.chars().count()).unwrap_or(i64::MAX);
    let end = cell_at(word.start, word.direction, (len - 1).max(0));
    Point::new(
        (word.start.x + end.x) as f64 / 2.0,
        (word.start.y + end.y) as f64 / 2.0,
    )
}

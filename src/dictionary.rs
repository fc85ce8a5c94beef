//! Known-word dictionary consulted by the stability scorer.

#[cfg(test)]
#[path = "dictionary_test.rs"]
mod dictionary_test;

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// A set of uppercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// An empty dictionary; no word earns the dictionary bonus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a newline-separated word list. Entries are trimmed and
    /// uppercased; blank lines are dropped.
    #[must_use]
    pub fn from_word_list(text: &str) -> Self {
        text.lines().collect()
    }

    /// Read a word list from a file. `path` is always a filesystem path;
    /// `-` names a file called `-`, not stdin.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_word_list(&text))
    }

    /// Whether `word`, uppercased, is known.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}

//! Grapheme-cluster addressing of leaf text.
//!
//! Word expansion and the bounded search windows step over grapheme
//! clusters rather than scalars, so a base letter and its combining marks
//! always stay in the same word.

use unicode_segmentation::UnicodeSegmentation;

/// Whether a scalar counts as a word character (alphanumeric or `_`).
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether a grapheme cluster is part of a word.
#[must_use]
pub fn is_word_unit(unit: &str) -> bool {
    unit.chars().next().is_some_and(is_word_char)
}

/// Whether a grapheme cluster is whitespace.
#[must_use]
pub fn is_whitespace_unit(unit: &str) -> bool {
    unit.chars().next().is_some_and(char::is_whitespace)
}

/// Whether a grapheme cluster ends a sentence (`.`, `!` or `?`).
#[must_use]
pub fn is_sentence_terminator(unit: &str) -> bool {
    matches!(unit.chars().next(), Some('.' | '!' | '?'))
}

/// A string split into grapheme clusters, addressable by cluster index.
///
/// Index `len()` is the position just past the last cluster.
#[derive(Clone, Debug)]
pub struct TextUnits<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> TextUnits<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let starts = text.grapheme_indices(true).map(|(i, _)| i).collect();
        Self { text, starts }
    }

    /// Number of grapheme clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Byte offset where cluster `index` starts; text length past the end.
    #[must_use]
    pub fn byte_offset(&self, index: usize) -> usize {
        self.starts.get(index).copied().unwrap_or(self.text.len())
    }

    /// Cluster at `index`, or `None` past the end.
    #[must_use]
    pub fn unit(&self, index: usize) -> Option<&'a str> {
        let start = *self.starts.get(index)?;
        Some(&self.text[start..self.byte_offset(index + 1)])
    }

    /// Index of the cluster containing byte `offset`.
    #[must_use]
    pub fn index_at(&self, offset: usize) -> usize {
        if offset >= self.text.len() {
            return self.len();
        }
        self.starts.partition_point(|&s| s <= offset).saturating_sub(1)
    }

    #[must_use]
    pub fn is_word(&self, index: usize) -> bool {
        self.unit(index).is_some_and(is_word_unit)
    }

    #[must_use]
    pub fn is_whitespace(&self, index: usize) -> bool {
        self.unit(index).is_some_and(is_whitespace_unit)
    }

    #[must_use]
    pub fn is_terminator(&self, index: usize) -> bool {
        self.unit(index).is_some_and(is_sentence_terminator)
    }

    /// Text between two cluster indices.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }
}

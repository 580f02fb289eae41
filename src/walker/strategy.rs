//! Ready-made match strategies for [`FlattenedIndex::search`].
//!
//! [`leaf_matches`] matches inside each leaf on its own, so an occurrence
//! never spans a leaf boundary. [`joined_matches`] matches over the
//! concatenated stream and maps each hit back to the leaves it covers.
//!
//! [`FlattenedIndex::search`]: super::FlattenedIndex::search

use super::RangeMaker;
use crate::error::Result;
use crate::tree::TextRange;
use regex::Regex;

/// One occurrence in flattened coordinates.
///
/// Offsets are byte offsets into the flattened leaf texts, and
/// `(start_index, start_offset) <= (end_index, end_offset)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub start_index: usize,
    pub start_offset: usize,
    pub end_index: usize,
    pub end_offset: usize,
    pub text: String,
}

impl Match {
    /// Resolve this match against the index it came from.
    pub fn range(&self, ranges: RangeMaker<'_>) -> Result<TextRange> {
        ranges.make_range(
            self.start_index,
            self.start_offset,
            self.end_index,
            self.end_offset,
        )
    }

    #[must_use]
    pub const fn is_single_leaf(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// Every match of `regex` inside each leaf, in document order.
pub fn leaf_matches<'a>(regex: &'a Regex, texts: &'a [String]) -> impl Iterator<Item = Match> + 'a {
    texts.iter().enumerate().flat_map(move |(index, text)| {
        regex.find_iter(text).map(move |m| Match {
            start_index: index,
            start_offset: m.start(),
            end_index: index,
            end_offset: m.end(),
            text: m.as_str().to_string(),
        })
    })
}

/// Every match of `regex` over the concatenation of the leaf texts.
#[must_use]
pub fn joined_matches<'r>(regex: &'r Regex, texts: &[String]) -> JoinedMatches<'r> {
    let mut starts = Vec::with_capacity(texts.len());
    let mut ends = Vec::with_capacity(texts.len());
    let mut joined = String::new();
    for text in texts {
        starts.push(joined.len());
        joined.push_str(text);
        ends.push(joined.len());
    }
    JoinedMatches {
        regex,
        joined,
        starts,
        ends,
        pos: Some(0),
    }
}

/// Iterator returned by [`joined_matches`].
#[derive(Debug)]
pub struct JoinedMatches<'r> {
    regex: &'r Regex,
    joined: String,
    starts: Vec<usize>,
    ends: Vec<usize>,
    /// Where the next search begins; `None` once exhausted.
    pos: Option<usize>,
}

impl JoinedMatches<'_> {
    /// Leaf holding stream offset `at` as a start position: the last leaf
    /// beginning at or before it.
    fn start_leaf(&self, at: usize) -> usize {
        self.starts.partition_point(|&s| s <= at).saturating_sub(1)
    }

    /// Leaf holding stream offset `at` as an end position: the first leaf at
    /// or after `from` ending at or after it.
    fn end_leaf(&self, at: usize, from: usize) -> usize {
        self.ends.partition_point(|&e| e < at).max(from)
    }
}

impl Iterator for JoinedMatches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Self::Item> {
        if self.starts.is_empty() {
            return None;
        }
        let pos = self.pos?;
        let Some(found) = self.regex.find_at(&self.joined, pos) else {
            self.pos = None;
            return None;
        };

        // Step over empty matches so the search always advances.
        self.pos = if found.is_empty() {
            self.joined[found.end()..]
                .chars()
                .next()
                .map(|c| found.end() + c.len_utf8())
        } else {
            Some(found.end())
        };

        let start_index = self.start_leaf(found.start());
        let end_index = self.end_leaf(found.end(), start_index);
        Some(Match {
            start_index,
            start_offset: found.start() - self.starts[start_index],
            end_index,
            end_offset: found.end() - self.starts[end_index],
            text: found.as_str().to_string(),
        })
    }
}

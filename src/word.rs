//! Word-at-point resolution.
//!
//! [`resolve_word_at`] takes one text leaf and an offset (typically from a
//! click or tap), finds the word there or the nearest word within a small
//! window, finds the enclosing sentence within a larger window, and builds a
//! short context string around the word. The leaf is then replaced in the
//! tree by up to three siblings: the text before the word, a
//! [`MarkerKind::Clicked`] marker holding the word, and the text after it.
//!
//! All windows count grapheme clusters, not bytes.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::style::Style;
use crate::tree::{DocumentTree, Marker, MarkerKind, NodeId};
use crate::unicode::TextUnits;
use std::iter;
use std::ops::Range;

/// Tuning for [`resolve_word_at`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveOptions {
    /// How far to look left, then right, for a word when the offset is not
    /// on one. Default 10.
    pub nearest_word_window: usize,
    /// How far to look each way for a sentence terminator. Default 200.
    pub sentence_window: usize,
    /// Tokens taken on each side of the word for the context. Default 5.
    pub context_words: usize,
    /// Visual treatment of the clicked-word marker.
    pub marker_style: Style,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            nearest_word_window: 10,
            sentence_window: 200,
            context_words: 5,
            marker_style: Style::CLICKED,
        }
    }
}

impl ResolveOptions {
    #[must_use]
    pub const fn with_nearest_word_window(mut self, window: usize) -> Self {
        self.nearest_word_window = window;
        self
    }

    #[must_use]
    pub const fn with_sentence_window(mut self, window: usize) -> Self {
        self.sentence_window = window;
        self
    }

    #[must_use]
    pub const fn with_context_words(mut self, count: usize) -> Self {
        self.context_words = count;
        self
    }

    #[must_use]
    pub const fn with_marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }
}

/// A resolved word and the marker now holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordHit {
    pub word: String,
    /// The leaf that was clicked. It is detached from the tree once the
    /// fragments replace it, but keeps its original text.
    pub leaf: NodeId,
    /// Byte offsets of the word in the original leaf text.
    pub start: usize,
    pub end: usize,
    /// Up to N tokens before the word, the word, and up to N tokens after,
    /// separated by single spaces.
    pub context: String,
    /// Byte offsets of the sentence window in the original leaf text.
    pub context_start: usize,
    pub context_end: usize,
    /// The clicked-word marker inserted in place of the leaf.
    pub marker: NodeId,
}

/// Resolve the word at `offset` in `leaf` and mark it in the tree.
///
/// Returns `Ok(None)` when `leaf` is not a text leaf, is empty or
/// whitespace-only, or has no word character within the search windows.
///
/// # Errors
///
/// [`Error::InvalidCoordinates`] when `offset` lies past the text or inside a
/// scalar, [`Error::Detached`] when the leaf has no parent to adopt the
/// fragments, and [`Error::UnknownNode`] for an id from another tree.
pub fn resolve_word_at(
    tree: &mut DocumentTree,
    leaf: NodeId,
    offset: usize,
    options: &ResolveOptions,
) -> Result<Option<WordHit>> {
    if !tree.contains_id(leaf) {
        return Err(Error::UnknownNode(leaf));
    }
    let Some(text) = tree.text(leaf) else {
        return Ok(None);
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    tree.check_offset(leaf, offset)?;

    let text = text.to_string();
    let units = TextUnits::new(&text);
    let at = units.index_at(offset);
    let Some(word) = locate_word(&units, at, options.nearest_word_window) else {
        emit_log_with(LogLevel::Debug, || {
            format!("no word within {} units of {leaf}:{offset}", options.nearest_word_window)
        });
        return Ok(None);
    };
    let sentence = sentence_bounds(&units, &word, options.sentence_window);
    let context = build_context(&units, &word, &sentence, options.context_words);

    let start = units.byte_offset(word.start);
    let end = units.byte_offset(word.end);
    let marker = splice_marker(tree, leaf, &text, start..end, options.marker_style)?;

    let hit = WordHit {
        word: text[start..end].to_string(),
        leaf,
        start,
        end,
        context,
        context_start: units.byte_offset(sentence.start),
        context_end: units.byte_offset(sentence.end),
        marker,
    };
    emit_log_with(LogLevel::Debug, || {
        format!("resolved {:?} at {leaf}:{offset}, context {:?}", hit.word, hit.context)
    });
    Ok(Some(hit))
}

/// Cluster span of the word at `at`, or of the nearest word within `window`
/// clusters (left side first).
fn locate_word(units: &TextUnits<'_>, at: usize, window: usize) -> Option<Range<usize>> {
    let anchor = if units.is_word(at) {
        at
    } else {
        (at.saturating_sub(window)..at)
            .rev()
            .find(|&i| units.is_word(i))
            .or_else(|| (at + 1..units.len().min(at + window)).find(|&i| units.is_word(i)))?
    };

    let mut start = anchor;
    while start > 0 && units.is_word(start - 1) {
        start -= 1;
    }
    let mut end = anchor;
    while units.is_word(end) {
        end += 1;
    }
    Some(start..end)
}

/// Cluster span of the sentence around `word`.
///
/// The start is just past a terminator followed by whitespace, the end just
/// past the next terminator. Without a terminator inside the window the
/// window edge is used as is.
fn sentence_bounds(units: &TextUnits<'_>, word: &Range<usize>, window: usize) -> Range<usize> {
    let floor = word.start.saturating_sub(window);
    let ceiling = units.len().min(word.end + window);

    let start = (floor..word.start)
        .rev()
        .find(|&i| units.is_terminator(i) && units.is_whitespace(i + 1))
        .map_or(floor, |i| (i + 2).min(word.start));
    let end = (word.end..ceiling)
        .find(|&i| units.is_terminator(i))
        .map_or(ceiling, |i| i + 1);
    start..end
}

fn build_context(
    units: &TextUnits<'_>,
    word: &Range<usize>,
    sentence: &Range<usize>,
    count: usize,
) -> String {
    let before: Vec<&str> = units
        .slice(sentence.start, word.start)
        .split_whitespace()
        .collect();
    let skip = before.len().saturating_sub(count);
    let after = units.slice(word.end, sentence.end).split_whitespace().take(count);

    before[skip..]
        .iter()
        .copied()
        .chain(iter::once(units.slice(word.start, word.end)))
        .chain(after)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace `leaf` with `before`, a marker around `word`, and `after`;
/// empty outer fragments are omitted.
fn splice_marker(
    tree: &mut DocumentTree,
    leaf: NodeId,
    text: &str,
    word: Range<usize>,
    style: Style,
) -> Result<NodeId> {
    if tree.parent(leaf).is_none() {
        return Err(Error::Detached(leaf));
    }
    let mut fragments = Vec::with_capacity(3);
    if word.start > 0 {
        fragments.push(tree.create_text(&text[..word.start]));
    }
    let marker = tree.create_marker(Marker::new(MarkerKind::Clicked, style));
    let inner = tree.create_text(&text[word.clone()]);
    tree.append_child(marker, inner)?;
    fragments.push(marker);
    if word.end < text.len() {
        fragments.push(tree.create_text(&text[word.end..]));
    }
    tree.replace_with(leaf, &fragments)?;
    Ok(marker)
}

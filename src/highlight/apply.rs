//! Wrapping and unwrapping highlight markers.
//!
//! Applying is two-phase. [`find_occurrences`] walks the region once and
//! records every occurrence without touching the tree; [`wrap_occurrences`]
//! then wraps them from last to first. Wrapping splits a leaf and leaves the
//! original node holding only the text before the occurrence, so an offset
//! recorded for a later occurrence in that leaf would no longer exist. Going
//! backwards means every occurrence still waiting sits at or before the
//! current one and its offsets are untouched.

use crate::error::Result;
use crate::event::{LogLevel, emit_log_with};
use crate::style::Style;
use crate::tree::{DocumentTree, Marker, MarkerKind, NodeId};
use crate::unicode::fold_case;
use crate::walker::{self, Region, strategy};
use regex::Regex;
use std::collections::BTreeMap;

/// Folded term to occurrence count.
pub type Frequencies = BTreeMap<String, usize>;

/// One occurrence inside a single leaf, in byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub leaf: NodeId,
    pub start: usize,
    pub end: usize,
    /// Matched text as it appears in the document.
    pub text: String,
    /// Whether the leaf already sits inside a highlight marker.
    pub already_marked: bool,
}

impl Occurrence {
    /// Frequency key of this occurrence.
    #[must_use]
    pub fn term(&self) -> String {
        fold_case(&self.text)
    }
}

/// Outcome of [`apply_highlights`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Every occurrence found, counted per folded term, including ones that
    /// were already highlighted.
    pub frequencies: Frequencies,
    /// New markers in document order, each with its folded term.
    pub markers: Vec<(NodeId, String)>,
    /// Occurrences left alone because they were already highlighted.
    pub already_marked: usize,
}

/// Record every match of `pattern` in the leaves under `root`.
///
/// Script and style content is skipped. Matches never span leaves. Empty
/// matches are dropped.
pub fn find_occurrences(
    tree: &DocumentTree,
    root: NodeId,
    pattern: &Regex,
) -> Result<Vec<Occurrence>> {
    let index = walker::flatten(tree, &Region::Subtree(root))?;
    index
        .search(|texts, ranges| {
            strategy::leaf_matches(pattern, texts)
                .filter(|m| !m.text.is_empty())
                .map(move |m| -> Result<Occurrence> {
                    let range = m.range(ranges)?;
                    let leaf = range.start.node;
                    Ok(Occurrence {
                        leaf,
                        start: range.start.offset,
                        end: range.end.offset,
                        already_marked: tree.nearest_marker(leaf, MarkerKind::Highlight).is_some(),
                        text: m.text,
                    })
                })
        })
        .collect()
}

/// Wrap occurrences in highlight markers, last to first.
///
/// `occurrences` must be in document order, as [`find_occurrences`] returns
/// them. Occurrences flagged as already marked are skipped. Returns the new
/// markers in document order.
pub fn wrap_occurrences(
    tree: &mut DocumentTree,
    occurrences: &[Occurrence],
    style: Style,
) -> Result<Vec<(NodeId, String)>> {
    let marker = Marker::new(MarkerKind::Highlight, style);
    let mut wrapped = Vec::new();
    for occurrence in occurrences.iter().rev().filter(|o| !o.already_marked) {
        let id = tree.wrap_in_marker(occurrence.leaf, occurrence.start, occurrence.end, marker)?;
        wrapped.push((id, occurrence.term()));
    }
    wrapped.reverse();
    Ok(wrapped)
}

/// Highlight every match of `pattern` under `root`.
///
/// Re-applying the same pattern is idempotent: occurrences already inside a
/// highlight marker are counted again but not wrapped again.
pub fn apply_highlights(
    tree: &mut DocumentTree,
    root: NodeId,
    pattern: &Regex,
    style: Style,
) -> Result<Applied> {
    let occurrences = find_occurrences(tree, root, pattern)?;
    let mut frequencies = Frequencies::new();
    for occurrence in &occurrences {
        *frequencies.entry(occurrence.term()).or_insert(0) += 1;
    }
    let already_marked = occurrences.iter().filter(|o| o.already_marked).count();
    let markers = wrap_occurrences(tree, &occurrences, style)?;

    emit_log_with(LogLevel::Debug, || {
        format!(
            "highlighted {} occurrences under {root} ({} new, {already_marked} already marked)",
            occurrences.len(),
            markers.len()
        )
    });
    Ok(Applied {
        frequencies,
        markers,
        already_marked,
    })
}

/// Unwrap every highlight marker under `root` whose text equals `term`
/// case-insensitively. Returns the unwrapped markers, now detached, in
/// document order.
pub fn remove_highlight(
    tree: &mut DocumentTree,
    root: NodeId,
    term: &str,
) -> Result<Vec<NodeId>> {
    let wanted = fold_case(term.trim());
    let doomed: Vec<NodeId> = tree
        .markers(root, MarkerKind::Highlight)
        .into_iter()
        .filter(|&marker| fold_case(&tree.text_content(marker)) == wanted)
        .collect();
    for &marker in &doomed {
        tree.unwrap_marker(marker)?;
    }
    emit_log_with(LogLevel::Debug, || {
        format!("removed {} markers for {wanted:?} under {root}", doomed.len())
    });
    Ok(doomed)
}

//! Per-document highlight state.

use super::apply::{Applied, Frequencies};
use super::pattern::build_pattern;
use crate::error::Result;
use crate::tree::NodeId;
use crate::unicode::fold_case;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// Highlighted terms, their occurrence counts, and which marker belongs to
/// which term.
///
/// Terms are stored folded (see [`fold_case`]), so `"Whale"` and `"whale"`
/// are one entry. The marker side table only ever holds ids handed back by
/// a highlighting pass; entries leave it through
/// [`forget_markers`](Self::forget_markers) or [`reset`](Self::reset).
#[derive(Clone, Debug, Default)]
pub struct HighlightSession {
    terms: BTreeSet<String>,
    counts: Frequencies,
    marker_terms: HashMap<NodeId, String>,
}

impl HighlightSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything: terms, counts and markers.
    pub fn reset(&mut self) {
        self.terms.clear();
        self.counts.clear();
        self.marker_terms.clear();
    }

    /// Highlighted terms in folded form, sorted.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(&fold_case(term.trim()))
    }

    /// Add a term; returns false if it was already tracked or is blank.
    pub fn insert(&mut self, term: &str) -> bool {
        let key = fold_case(term.trim());
        !key.is_empty() && self.terms.insert(key)
    }

    /// Stop tracking a term and drop its count. Marker entries stay until
    /// the markers themselves are gone (see
    /// [`forget_markers`](Self::forget_markers)).
    pub fn remove(&mut self, term: &str) -> bool {
        let key = fold_case(term.trim());
        self.counts.remove(&key);
        self.terms.remove(&key)
    }

    /// Replace the tracked term set wholesale. Counts and markers are kept.
    pub fn set_terms<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms = terms
            .into_iter()
            .map(|t| fold_case(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect();
    }

    /// Pattern for the whole tracked set, `None` when it is empty.
    pub fn pattern(&self) -> Result<Option<Regex>> {
        build_pattern(&self.terms)
    }

    /// Fold in a pass that highlighted one term.
    ///
    /// The term's previous count is dropped first, so a pass that finds
    /// nothing leaves no stale count behind. Other terms keep theirs.
    pub fn record_term(&mut self, term: &str, applied: &Applied) {
        self.counts.remove(&fold_case(term.trim()));
        for (key, &count) in &applied.frequencies {
            self.counts.insert(key.clone(), count);
        }
        self.remember_markers(applied);
    }

    /// Fold in a pass over the whole tracked set; the counts become exactly
    /// that pass's frequencies.
    pub fn record_all(&mut self, applied: &Applied) {
        self.counts.clone_from(&applied.frequencies);
        self.remember_markers(applied);
    }

    fn remember_markers(&mut self, applied: &Applied) {
        for (marker, term) in &applied.markers {
            self.marker_terms.insert(*marker, term.clone());
        }
    }

    /// Drop side-table entries for markers that were unwrapped.
    pub fn forget_markers(&mut self, markers: &[NodeId]) {
        for marker in markers {
            self.marker_terms.remove(marker);
        }
    }

    /// Occurrence counts from the latest passes.
    #[must_use]
    pub const fn counts(&self) -> &Frequencies {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, term: &str) -> usize {
        self.counts.get(&fold_case(term.trim())).copied().unwrap_or(0)
    }

    /// Term a highlight marker was created for.
    #[must_use]
    pub fn marker_term(&self, marker: NodeId) -> Option<&str> {
        self.marker_terms.get(&marker).map(String::as_str)
    }

    /// Markers recorded for a term, in id order.
    #[must_use]
    pub fn markers_for(&self, term: &str) -> Vec<NodeId> {
        let key = fold_case(term.trim());
        let mut markers: Vec<NodeId> = self
            .marker_terms
            .iter()
            .filter(|(_, t)| **t == key)
            .map(|(&m, _)| m)
            .collect();
        markers.sort_unstable();
        markers
    }
}

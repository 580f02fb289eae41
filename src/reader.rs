//! Caller-facing reading surface.
//!
//! A [`Reader`] owns the currently loaded [`DocumentTree`], tracks the
//! container the visible range lives in, and routes highlight, unhighlight
//! and word lookups to the right part of the tree. The rendering host calls
//! [`Reader::load`] when a document is rendered and [`Reader::relocate`]
//! whenever the visible range changes.
//!
//! # Examples
//!
//! ```
//! use leafmark::{DocumentTree, Reader, ReaderOptions, Tag};
//!
//! let mut tree = DocumentTree::new();
//! let p = tree.append_element(tree.root(), Tag::P).unwrap();
//! tree.append_text(p, "Call me Ishmael. Some years ago, never mind how long.").unwrap();
//!
//! let mut reader = Reader::new(ReaderOptions::default());
//! reader.load(tree);
//! let counts = reader.highlight(Some("ishmael")).unwrap();
//! assert_eq!(counts.get("ishmael"), Some(&1));
//! assert!(reader.highlighted_words().any(|w| w == "ishmael"));
//!
//! assert_eq!(reader.unhighlight("ISHMAEL").unwrap(), 1);
//! assert_eq!(reader.highlighted_words().count(), 0);
//! ```

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log_with, names};
use crate::highlight::{
    self, Applied, Frequencies, HighlightOptions, HighlightSession, build_pattern,
};
use crate::tree::{DocumentTree, MarkerKind, NodeId, TextRange};
use crate::word::{self, ResolveOptions, WordHit};

/// Reader configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReaderOptions {
    pub resolve: ResolveOptions,
    pub highlight: HighlightOptions,
}

impl ReaderOptions {
    #[must_use]
    pub const fn with_resolve_options(mut self, options: ResolveOptions) -> Self {
        self.resolve = options;
        self
    }

    #[must_use]
    pub const fn with_highlight_options(mut self, options: HighlightOptions) -> Self {
        self.highlight = options;
        self
    }
}

/// The reading session over one loaded document.
#[derive(Debug, Default)]
pub struct Reader {
    options: ReaderOptions,
    tree: Option<DocumentTree>,
    container: Option<NodeId>,
    visible: Vec<NodeId>,
    session: HighlightSession,
}

impl Reader {
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Adopt a freshly rendered document.
    ///
    /// Highlight state from the previous document is dropped and the
    /// container becomes the tree root until the first relocation.
    pub fn load(&mut self, tree: DocumentTree) {
        let leaves = tree
            .content_descendants(tree.root())
            .filter(|&n| tree.is_text(n))
            .count();
        self.container = Some(tree.root());
        self.tree = Some(tree);
        self.visible.clear();
        self.session.reset();
        emit_log_with(LogLevel::Info, || format!("loaded document with {leaves} leaves"));
        emit_event(names::LOAD, &leaves.to_string());
    }

    /// Follow a change of the visible range.
    ///
    /// The container becomes the range's common ancestor, lifted to the
    /// enclosing element when the range sits inside one text leaf. Returns
    /// the new container.
    pub fn relocate(&mut self, range: &TextRange) -> Result<NodeId> {
        let tree = self.tree.as_ref().ok_or(Error::NoDocument)?;
        for point in [range.start, range.end] {
            tree.check_point(point)?;
            if !tree.is_attached(point.node) {
                return Err(Error::Detached(point.node));
            }
        }
        let ancestor = tree
            .common_ancestor(range.start.node, range.end.node)
            .unwrap_or_else(|| tree.root());
        let container = if tree.is_text(ancestor) {
            tree.parent(ancestor).unwrap_or_else(|| tree.root())
        } else {
            ancestor
        };
        self.visible = tree.elements_in_range(range);
        self.container = Some(container);
        emit_event(names::RELOCATE, &container.to_string());
        Ok(container)
    }

    /// Highlight one term, or re-apply the whole tracked set.
    ///
    /// With `Some(term)` the term joins the tracked set and only its counts
    /// are updated; with `None` every tracked term is highlighted again (for
    /// instance after navigation) and the counts are replaced. Returns the
    /// frequencies found by this pass.
    pub fn highlight(&mut self, term: Option<&str>) -> Result<Frequencies> {
        let tree = self.tree.as_mut().ok_or(Error::NoDocument)?;
        let container = self
            .container
            .filter(|&c| tree.is_attached(c))
            .unwrap_or_else(|| tree.root());

        let pattern = match term {
            Some(term) => {
                self.session.insert(term);
                build_pattern([term])?
            }
            None => self.session.pattern()?,
        };
        let applied = match pattern {
            Some(pattern) => highlight::apply_highlights(
                tree,
                container,
                &pattern,
                self.options.highlight.marker_style,
            )?,
            None => Applied::default(),
        };
        match term {
            Some(term) => self.session.record_term(term, &applied),
            None => self.session.record_all(&applied),
        }

        emit_event(names::HIGHLIGHT, &format_frequencies(&applied.frequencies));
        Ok(applied.frequencies)
    }

    /// Remove one term's markers under the container and stop tracking it.
    ///
    /// Returns how many markers were removed. Without a loaded document this
    /// does nothing.
    pub fn unhighlight(&mut self, term: &str) -> Result<usize> {
        let Some(tree) = self.tree.as_mut() else {
            return Ok(0);
        };
        let container = self
            .container
            .filter(|&c| tree.is_attached(c))
            .unwrap_or_else(|| tree.root());
        let unwrapped = highlight::remove_highlight(tree, container, term)?;
        let removed = unwrapped.len();
        self.session.forget_markers(&unwrapped);
        self.session.remove(term);
        emit_event(names::UNHIGHLIGHT, &format!("{}={removed}", term.trim()));
        Ok(removed)
    }

    /// Resolve the word at a point and mark it as clicked.
    pub fn resolve_word_at(&mut self, leaf: NodeId, offset: usize) -> Result<Option<WordHit>> {
        let tree = self.tree.as_mut().ok_or(Error::NoDocument)?;
        let hit = word::resolve_word_at(tree, leaf, offset, &self.options.resolve)?;
        if let Some(hit) = &hit {
            emit_event(names::WORD, &hit.word);
        }
        Ok(hit)
    }

    /// Tracked term whose highlight marker encloses `node`, if any.
    #[must_use]
    pub fn highlighted_term_at(&self, node: NodeId) -> Option<&str> {
        let tree = self.tree.as_ref()?;
        if !tree.contains_id(node) {
            return None;
        }
        let marker = tree.nearest_marker(node, MarkerKind::Highlight)?;
        self.session.marker_term(marker)
    }

    /// Unwrap every clicked-word marker under the container. Returns how many
    /// were removed.
    pub fn clear_clicked(&mut self) -> Result<usize> {
        let Some(tree) = self.tree.as_mut() else {
            return Ok(0);
        };
        let container = self
            .container
            .filter(|&c| tree.is_attached(c))
            .unwrap_or_else(|| tree.root());
        let markers = tree.markers(container, MarkerKind::Clicked);
        // nested markers come after their parent in document order
        for &marker in markers.iter().rev() {
            tree.unwrap_marker(marker)?;
        }
        emit_event(names::CLEAR_CLICKED, &markers.len().to_string());
        Ok(markers.len())
    }

    /// Replace the tracked term set without touching the tree.
    pub fn set_highlighted_words<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.session.set_terms(terms);
    }

    /// Tracked terms, folded and sorted.
    pub fn highlighted_words(&self) -> impl Iterator<Item = &str> {
        self.session.terms()
    }

    /// Occurrence counts from the latest highlighting passes.
    #[must_use]
    pub const fn frequencies(&self) -> &Frequencies {
        self.session.counts()
    }

    #[must_use]
    pub const fn session(&self) -> &HighlightSession {
        &self.session
    }

    /// Node highlighting and lookups are scoped to.
    #[must_use]
    pub const fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Elements spanned by the last visible range.
    #[must_use]
    pub fn visible_elements(&self) -> &[NodeId] {
        &self.visible
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&DocumentTree> {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> Option<&mut DocumentTree> {
        self.tree.as_mut()
    }
}

fn format_frequencies(frequencies: &Frequencies) -> String {
    frequencies
        .iter()
        .map(|(term, count)| format!("{term}={count}"))
        .collect::<Vec<_>>()
        .join(",")
}

//! Flattening a region of the tree into one logical text stream.
//!
//! [`flatten`] collects the text leaves of a [`Region`] in document order,
//! rejecting script and style subtrees, into a [`FlattenedIndex`]. The index
//! hands its leaf texts to a match strategy together with a [`RangeMaker`]
//! that turns flattened coordinates back into ranges over the original
//! leaves, and [`FlattenedIndex::search`] exposes whatever the strategy
//! produces as a lazy [`Matches`] iterator.
//!
//! The index is a snapshot: once the tree is mutated its coordinates are
//! stale and the region must be flattened again.
//!
//! # Examples
//!
//! ```
//! use leafmark::walker::{self, Region, strategy};
//! use leafmark::{DocumentTree, Tag};
//! use regex::Regex;
//!
//! let mut tree = DocumentTree::new();
//! let p = tree.append_element(tree.root(), Tag::P).unwrap();
//! tree.append_text(p, "white ").unwrap();
//! let em = tree.append_element(p, Tag::Em).unwrap();
//! tree.append_text(em, "whale").unwrap();
//!
//! let index = walker::flatten(&tree, &Region::Document).unwrap();
//! let re = Regex::new("white whale").unwrap();
//! let ranges: Vec<_> = index
//!     .search(|texts, ranges| {
//!         strategy::joined_matches(&re, texts).map(move |m| m.range(ranges))
//!     })
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tree.range_text(&ranges[0]).unwrap(), "white whale");
//! ```

pub mod strategy;

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::tree::{ClippedLeaf, DocumentTree, NodeId, Point, TextRange};

/// The part of the tree a flattening pass covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Every leaf below the tree root.
    Document,
    /// Every leaf below one node (the node itself included).
    Subtree(NodeId),
    /// Leaves intersecting `start..=end`, clipped to the two points.
    Between { start: Point, end: Point },
}

impl Region {
    #[must_use]
    pub const fn between(start: Point, end: Point) -> Self {
        Self::Between { start, end }
    }

    #[must_use]
    pub const fn from_range(range: &TextRange) -> Self {
        Self::Between {
            start: range.start,
            end: range.end,
        }
    }
}

/// Ordered projection of a region's text leaves.
///
/// Entry `i` holds a leaf id, the leaf text inside the region, and the byte
/// offset in the leaf where that text begins (non-zero only for a first leaf
/// clipped by a region start).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlattenedIndex {
    leaves: Vec<NodeId>,
    bases: Vec<usize>,
    texts: Vec<String>,
}

/// Flatten a region into a [`FlattenedIndex`].
///
/// A bounded region whose end precedes its start yields an empty index.
pub fn flatten(tree: &DocumentTree, region: &Region) -> Result<FlattenedIndex> {
    let mut index = FlattenedIndex::default();
    match *region {
        Region::Document => index.extend_subtree(tree, tree.root()),
        Region::Subtree(root) => {
            if !tree.contains_id(root) {
                return Err(Error::UnknownNode(root));
            }
            index.extend_subtree(tree, root);
        }
        Region::Between { start, end } => {
            let range = TextRange::new(start, end);
            for ClippedLeaf { leaf, span } in tree.clip_leaves(&range, true)? {
                let text = tree.text(leaf).unwrap_or_default();
                index.push(leaf, span.start, &text[span]);
            }
        }
    }
    emit_log_with(LogLevel::Debug, || {
        format!("flattened {} leaves from {region:?}", index.len())
    });
    Ok(index)
}

impl FlattenedIndex {
    fn extend_subtree(&mut self, tree: &DocumentTree, root: NodeId) {
        for node in tree.content_descendants(root) {
            if let Some(text) = tree.text(node) {
                self.push(node, 0, text);
            }
        }
    }

    fn push(&mut self, leaf: NodeId, base: usize, text: &str) {
        self.leaves.push(leaf);
        self.bases.push(base);
        self.texts.push(text.to_string());
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaf ids in document order.
    #[must_use]
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Leaf texts in document order.
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Concatenation of every leaf text: the logical text of the region.
    #[must_use]
    pub fn joined(&self) -> String {
        self.texts.concat()
    }

    /// Range reconstructor bound to this index.
    #[must_use]
    pub const fn range_maker(&self) -> RangeMaker<'_> {
        RangeMaker { index: self }
    }

    /// Run a match strategy over the leaf texts.
    ///
    /// The strategy receives the texts and a [`RangeMaker`] and returns any
    /// iterable; its items are produced lazily, one per `next()` call, and
    /// the caller may stop early.
    pub fn search<'a, F, I>(&'a self, strategy: F) -> Matches<I::IntoIter>
    where
        F: FnOnce(&'a [String], RangeMaker<'a>) -> I,
        I: IntoIterator,
    {
        Matches {
            inner: strategy(&self.texts, self.range_maker()).into_iter(),
            produced: 0,
        }
    }

    fn point(&self, index: usize, offset: usize) -> Result<Point> {
        let len = self.len();
        let (Some(&leaf), Some(text)) = (self.leaves.get(index), self.texts.get(index)) else {
            return Err(Error::InvalidIndex { index, len });
        };
        if offset > text.len() || !text.is_char_boundary(offset) {
            return Err(Error::InvalidCoordinates {
                node: Some(leaf),
                offset,
                len: text.len(),
            });
        }
        Ok(Point::new(leaf, self.bases[index] + offset))
    }
}

/// Turns flattened `(leaf index, offset)` pairs into tree ranges.
#[derive(Clone, Copy, Debug)]
pub struct RangeMaker<'a> {
    index: &'a FlattenedIndex,
}

impl RangeMaker<'_> {
    /// Build a range from flattened coordinates.
    ///
    /// Offsets are relative to the flattened leaf texts. Coordinates outside
    /// the index, or an end before the start, are rejected: they can only
    /// come from a different (stale) flattening pass.
    pub fn make_range(
        &self,
        start_index: usize,
        start_offset: usize,
        end_index: usize,
        end_offset: usize,
    ) -> Result<TextRange> {
        let start = self.index.point(start_index, start_offset)?;
        let end = self.index.point(end_index, end_offset)?;
        if (start_index, start_offset) > (end_index, end_offset) {
            return Err(Error::InvalidCoordinates {
                node: Some(end.node),
                offset: end_offset,
                len: start_offset,
            });
        }
        Ok(TextRange::new(start, end))
    }
}

/// Lazy sequence of strategy results.
#[derive(Clone, Debug)]
pub struct Matches<I> {
    inner: I,
    produced: usize,
}

impl<I> Matches<I> {
    /// How many items have been pulled so far.
    #[must_use]
    pub const fn produced(&self) -> usize {
        self.produced
    }
}

impl<I: Iterator> Iterator for Matches<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.produced += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

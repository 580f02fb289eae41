//! Boundary points, ranges and document-order comparison.
//!
//! Points follow DOM range semantics: on a text leaf the offset is a byte
//! offset into its text, on an element it is a child index.

use super::{DocumentTree, NodeId};
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Range;

/// A boundary point in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub node: NodeId,
    pub offset: usize,
}

impl Point {
    #[must_use]
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A pair of boundary points anchored to tree nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Range covering `start..end` of a single leaf.
    #[must_use]
    pub const fn in_leaf(leaf: NodeId, start: usize, end: usize) -> Self {
        Self {
            start: Point::new(leaf, start),
            end: Point::new(leaf, end),
        }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The part of one leaf that falls inside a range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ClippedLeaf {
    pub leaf: NodeId,
    pub span: Range<usize>,
}

impl DocumentTree {
    /// Nodes from the root down to `id`, inclusive.
    fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// Length of a node as a boundary container: text bytes or child count.
    #[must_use]
    pub fn node_length(&self, id: NodeId) -> usize {
        self.text(id)
            .map_or_else(|| self.children(id).len(), str::len)
    }

    /// Check that a point addresses a real position.
    pub fn check_point(&self, point: Point) -> Result<()> {
        if self.is_text(point.node) {
            return self.check_offset(point.node, point.offset);
        }
        self.node(point.node)?;
        let len = self.node_length(point.node);
        if point.offset > len {
            return Err(Error::InvalidCoordinates {
                node: Some(point.node),
                offset: point.offset,
                len,
            });
        }
        Ok(())
    }

    /// Compare two points in document order.
    ///
    /// Returns `None` when the points live in disconnected subtrees.
    #[must_use]
    pub fn compare_points(&self, a: Point, b: Point) -> Option<Ordering> {
        if a.node == b.node {
            return Some(a.offset.cmp(&b.offset));
        }
        let path_a = self.path_from_root(a.node);
        let path_b = self.path_from_root(b.node);
        if path_a.first() != path_b.first() {
            return None;
        }
        let shared = path_a
            .iter()
            .zip(&path_b)
            .take_while(|(x, y)| x == y)
            .count();

        if shared == path_a.len() {
            // a.node contains b.node
            let child = self.index_in_parent(path_b[shared])?;
            return Some(if a.offset <= child {
                Ordering::Less
            } else {
                Ordering::Greater
            });
        }
        if shared == path_b.len() {
            let child = self.index_in_parent(path_a[shared])?;
            return Some(if b.offset <= child {
                Ordering::Greater
            } else {
                Ordering::Less
            });
        }
        let ia = self.index_in_parent(path_a[shared])?;
        let ib = self.index_in_parent(path_b[shared])?;
        Some(ia.cmp(&ib))
    }

    /// Deepest node containing both `a` and `b`.
    #[must_use]
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let path_a = self.path_from_root(a);
        let path_b = self.path_from_root(b);
        path_a
            .iter()
            .zip(&path_b)
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| *x)
    }

    /// Leaves under the range's common ancestor that intersect the range,
    /// each clipped to the part inside it.
    ///
    /// Walks in document order and stops at the first leaf past the end.
    /// An inverted range yields nothing.
    pub(crate) fn clip_leaves(
        &self,
        range: &TextRange,
        skip_excluded: bool,
    ) -> Result<Vec<ClippedLeaf>> {
        self.check_point(range.start)?;
        self.check_point(range.end)?;
        let Some(root) = self.common_ancestor(range.start.node, range.end.node) else {
            return Ok(Vec::new());
        };
        if self.compare_points(range.start, range.end) == Some(Ordering::Greater) {
            return Ok(Vec::new());
        }

        // pre-order ranks under the root; a leaf is inside the range when its
        // rank falls in first..past
        let rank: HashMap<NodeId, usize> = self
            .descendants(root)
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect();
        let first = self.boundary_rank(&rank, range.start, false);
        let past = self.boundary_rank(&rank, range.end, true);

        let walk = if skip_excluded {
            self.content_descendants(root)
        } else {
            self.descendants(root)
        };
        let mut clipped = Vec::new();
        for leaf in walk {
            let Some(text) = self.text(leaf) else {
                continue;
            };
            let len = text.len();
            let at = rank.get(&leaf).copied().unwrap_or(usize::MAX);
            if at >= past {
                break;
            }
            if at < first {
                continue;
            }
            let lo = if leaf == range.start.node {
                range.start.offset
            } else {
                0
            };
            let hi = if leaf == range.end.node {
                range.end.offset
            } else {
                len
            };
            clipped.push(ClippedLeaf { leaf, span: lo..hi });
        }
        Ok(clipped)
    }

    /// Pre-order rank of the first node at or after a boundary point.
    ///
    /// On an element `(e, k)` that is child `k`, or the node following `e`'s
    /// subtree when `k` is past the last child. On a leaf the leaf itself
    /// counts as inside, so an end point ranks one past it.
    fn boundary_rank(&self, rank: &HashMap<NodeId, usize>, point: Point, end: bool) -> usize {
        let Some(&node_rank) = rank.get(&point.node) else {
            return usize::MAX;
        };
        if self.is_text(point.node) {
            return if end { node_rank + 1 } else { node_rank };
        }
        match self.children(point.node).get(point.offset) {
            Some(child) => rank.get(child).copied().unwrap_or(usize::MAX),
            None => node_rank + self.descendants(point.node).count(),
        }
    }

    /// Text covered by a range, across leaf boundaries.
    ///
    /// Like a DOM range's string value this includes text inside script and
    /// style containers.
    pub fn range_text(&self, range: &TextRange) -> Result<String> {
        let mut out = String::new();
        for ClippedLeaf { leaf, span } in self.clip_leaves(range, false)? {
            if let Some(text) = self.text(leaf) {
                out.push_str(&text[span]);
            }
        }
        Ok(out)
    }

    /// Sibling elements from the element holding the range start through the
    /// one holding the range end.
    ///
    /// When the end element is not a following sibling of the start element,
    /// every following sibling is returned.
    #[must_use]
    pub fn elements_in_range(&self, range: &TextRange) -> Vec<NodeId> {
        let element_of = |id: NodeId| {
            if self.element(id).is_some() {
                Some(id)
            } else {
                self.parent(id)
            }
        };
        let (Some(start), Some(end)) = (element_of(range.start.node), element_of(range.end.node))
        else {
            return Vec::new();
        };
        if start == end {
            return vec![start];
        }

        let mut elements = Vec::new();
        let mut current = Some(start);
        while let Some(element) = current {
            elements.push(element);
            if element == end {
                break;
            }
            current = self.next_element_sibling(element);
        }
        elements
    }

    fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(sibling) = current {
            if self.element(sibling).is_some() {
                return Some(sibling);
            }
            current = self.next_sibling(sibling);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tag;

    /// `<body><p>Hello </p><p>brave <em>new</em> world</p></body>`
    fn sample() -> (DocumentTree, Vec<NodeId>) {
        let mut tree = DocumentTree::new();
        let p1 = tree.append_element(tree.root(), Tag::P).unwrap();
        let t1 = tree.append_text(p1, "Hello ").unwrap();
        let p2 = tree.append_element(tree.root(), Tag::P).unwrap();
        let t2 = tree.append_text(p2, "brave ").unwrap();
        let em = tree.append_element(p2, Tag::Em).unwrap();
        let t3 = tree.append_text(em, "new").unwrap();
        let t4 = tree.append_text(p2, " world").unwrap();
        (tree, vec![p1, t1, p2, t2, em, t3, t4])
    }

    #[test]
    fn test_compare_points_document_order() {
        let (tree, n) = sample();
        let (t1, t3, t4) = (n[1], n[5], n[6]);
        assert_eq!(
            tree.compare_points(Point::new(t1, 3), Point::new(t3, 0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            tree.compare_points(Point::new(t4, 0), Point::new(t3, 3)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            tree.compare_points(Point::new(t3, 1), Point::new(t3, 1)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_compare_points_container_offsets() {
        let (tree, n) = sample();
        let (p2, t2, t4) = (n[2], n[3], n[6]);
        // (p2, 0) sits before its first child.
        assert_eq!(
            tree.compare_points(Point::new(p2, 0), Point::new(t2, 0)),
            Some(Ordering::Less)
        );
        // (p2, 2) sits after the em, before " world".
        assert_eq!(
            tree.compare_points(Point::new(p2, 2), Point::new(t4, 0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            tree.compare_points(Point::new(t2, 1), Point::new(p2, 1)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_compare_points_disconnected() {
        let (mut tree, n) = sample();
        let lone = tree.create_text("lone");
        assert_eq!(
            tree.compare_points(Point::new(lone, 0), Point::new(n[1], 0)),
            None
        );
    }

    #[test]
    fn test_common_ancestor() {
        let (tree, n) = sample();
        assert_eq!(tree.common_ancestor(n[3], n[5]), Some(n[2]));
        assert_eq!(tree.common_ancestor(n[1], n[6]), Some(tree.root()));
        assert_eq!(tree.common_ancestor(n[5], n[5]), Some(n[5]));
    }

    #[test]
    fn test_range_text_across_leaves() {
        let (tree, n) = sample();
        let range = TextRange::new(Point::new(n[1], 2), Point::new(n[6], 3));
        assert_eq!(tree.range_text(&range).unwrap(), "llo brave new wo");
    }

    #[test]
    fn test_range_text_element_endpoints() {
        let (tree, n) = sample();
        let (p1, p2) = (n[0], n[2]);
        let root = tree.root();
        let tail = TextRange::new(Point::new(p2, 1), Point::new(root, 2));
        assert_eq!(tree.range_text(&tail).unwrap(), "new world");
        // (p1, 1) is past p1's only child
        let between = TextRange::new(Point::new(p1, 1), Point::new(p2, 1));
        assert_eq!(tree.range_text(&between).unwrap(), "brave ");
        let collapsed = TextRange::new(Point::new(p2, 1), Point::new(p2, 1));
        assert_eq!(tree.range_text(&collapsed).unwrap(), "");
    }

    #[test]
    fn test_clip_leaves_in_wide_container() {
        let mut tree = DocumentTree::new();
        let p = tree.append_element(tree.root(), Tag::P).unwrap();
        let leaves: Vec<NodeId> = (0..20_000)
            .map(|i| tree.append_text(p, &format!("w{i} ")).unwrap())
            .collect();
        let range = TextRange::new(Point::new(leaves[19_990], 1), Point::new(leaves[19_992], 3));
        assert_eq!(tree.range_text(&range).unwrap(), "19990 w19991 w19");

        let clipped = tree.clip_leaves(&range, true).unwrap();
        assert_eq!(clipped.len(), 3);
        assert_eq!(clipped[0].leaf, leaves[19_990]);
        assert_eq!(clipped[2].span, 0..3);
    }

    #[test]
    fn test_range_text_inverted_is_empty() {
        let (tree, n) = sample();
        let range = TextRange::new(Point::new(n[6], 3), Point::new(n[1], 2));
        assert_eq!(tree.range_text(&range).unwrap(), "");
    }

    #[test]
    fn test_range_text_rejects_bad_offset() {
        let (tree, n) = sample();
        let range = TextRange::new(Point::new(n[1], 0), Point::new(n[1], 99));
        assert!(matches!(
            tree.range_text(&range),
            Err(Error::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_elements_in_range() {
        let (tree, n) = sample();
        let (p1, t1, p2, t3) = (n[0], n[1], n[2], n[5]);
        let same = TextRange::in_leaf(t1, 0, 2);
        assert_eq!(tree.elements_in_range(&same), vec![p1]);

        let across = TextRange::new(Point::new(t1, 0), Point::new(n[3], 2));
        assert_eq!(tree.elements_in_range(&across), vec![p1, p2]);

        // end container (em) is not a sibling of p1: run to the last sibling
        let nested = TextRange::new(Point::new(t1, 0), Point::new(t3, 1));
        assert_eq!(tree.elements_in_range(&nested), vec![p1, p2]);
    }
}

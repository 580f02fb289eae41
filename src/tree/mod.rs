//! Arena-backed document tree of containers and text leaves.
//!
//! [`DocumentTree`] owns every node and hands out copyable [`NodeId`]s.
//! Nodes are never freed while the tree lives: removing a node from the tree
//! *detaches* it (it loses its parent) but it stays readable, so results such
//! as a [`WordHit`](crate::WordHit) can keep pointing at the leaf they
//! replaced.
//!
//! Document order is pre-order traversal from [`DocumentTree::root`].
//!
//! # Examples
//!
//! ```
//! use leafmark::{DocumentTree, Tag};
//!
//! let mut tree = DocumentTree::new();
//! let p = tree.append_element(tree.root(), Tag::P).unwrap();
//! tree.append_text(p, "Call me Ishmael.").unwrap();
//! assert_eq!(tree.text_content(tree.root()), "Call me Ishmael.");
//! assert_eq!(tree.to_markup(p), "<p>Call me Ishmael.</p>");
//! ```

mod range;
mod tag;

pub use range::{Point, TextRange};
pub use tag::Tag;

pub(crate) use range::ClippedLeaf;

use crate::error::{Error, Result};
use crate::style::Style;
use std::fmt;

/// Handle to a node in a [`DocumentTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Build an id from its raw arena index.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw arena index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Which kind of decoration a marker container represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// A highlighted term occurrence.
    Highlight,
    /// The word under a click or tap.
    Clicked,
}

impl MarkerKind {
    /// Lookup class the host attaches to the marker element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Highlight => "highlight-word",
            Self::Clicked => "clicked",
        }
    }
}

/// Decoration attached to a marker container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub style: Style,
}

impl Marker {
    #[must_use]
    pub const fn new(kind: MarkerKind, style: Style) -> Self {
        Self { kind, style }
    }
}

/// A container node.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: Tag,
    /// Set when this element is a decoration inserted by this crate.
    pub marker: Option<Marker>,
}

/// Payload of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ordered, rooted tree of elements and text leaves.
#[derive(Clone, Debug)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// Create a tree holding a single `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(Tag::Body)
    }

    /// Create a tree whose root element has the given tag.
    #[must_use]
    pub fn with_root(tag: Tag) -> Self {
        let root = Node {
            kind: NodeKind::Element(Element { tag, marker: None }),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of allocated nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` was allocated by this tree.
    #[must_use]
    pub fn contains_id(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(Error::UnknownNode(id))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    // ============================================
    // Inspection
    // ============================================

    /// Payload of a node.
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    /// Text of a leaf, `None` for elements and unknown ids.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        self.text(id).is_some()
    }

    /// Element payload, `None` for text leaves and unknown ids.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).map(|e| &e.tag)
    }

    #[must_use]
    pub fn marker(&self, id: NodeId) -> Option<Marker> {
        self.element(id).and_then(|e| e.marker)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Children of a node; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map_or(&[], |n| n.children.as_slice())
    }

    /// Position of a node among its parent's children.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Whether a node is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).any(|a| a == self.root)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Ancestors of a node, nearest first, excluding the node itself.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Pre-order traversal of `root` and everything below it.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants::new(self, root, false)
    }

    /// Pre-order traversal that rejects excluded containers (script, style)
    /// below `root` together with their subtrees.
    #[must_use]
    pub fn content_descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants::new(self, root, true)
    }

    /// Concatenated text of every leaf under a node.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Nearest inclusive ancestor that is a marker of the given kind.
    #[must_use]
    pub fn nearest_marker(&self, id: NodeId, kind: MarkerKind) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.marker(n).is_some_and(|m| m.kind == kind))
    }

    /// Markers of the given kind under `root`, in document order.
    #[must_use]
    pub fn markers(&self, root: NodeId, kind: MarkerKind) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&n| self.marker(n).is_some_and(|m| m.kind == kind))
            .collect()
    }

    // ============================================
    // Construction
    // ============================================

    /// Allocate a detached element.
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.alloc(NodeKind::Element(Element { tag, marker: None }))
    }

    /// Allocate a detached text leaf.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Allocate a detached marker container (a `span`).
    pub fn create_marker(&mut self, marker: Marker) -> NodeId {
        self.alloc(NodeKind::Element(Element {
            tag: Tag::Span,
            marker: Some(marker),
        }))
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child)
    }

    /// Move `child` to position `index` among `parent`'s children.
    ///
    /// `index` is clamped to the number of children.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.node(child)?;
        if self.element(parent).is_none() {
            self.node(parent)?;
            return Err(Error::NotElement(parent));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(Error::InvalidHierarchy { parent, child });
        }
        self.detach(child)?;
        let node = self.node_mut(parent)?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: Tag) -> Result<NodeId> {
        let id = self.create_element(tag);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Create a text leaf and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        let id = self.create_text(text);
        self.append_child(parent, id)?;
        Ok(id)
    }

    // ============================================
    // Mutation
    // ============================================

    /// Replace a leaf's text.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(current) => {
                text.clone_into(current);
                Ok(())
            }
            NodeKind::Element(_) => Err(Error::NotText(id)),
        }
    }

    /// Remove a node from its parent. Detached nodes are left as they are.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Put `replacements` where `id` is and detach `id`.
    pub fn replace_with(&mut self, id: NodeId, replacements: &[NodeId]) -> Result<()> {
        let parent = self.parent(id).ok_or(Error::Detached(id))?;
        for &replacement in replacements {
            self.node(replacement)?;
            if self.is_inclusive_ancestor(replacement, parent) {
                return Err(Error::InvalidHierarchy {
                    parent,
                    child: replacement,
                });
            }
        }
        for &replacement in replacements {
            if replacement == id {
                continue;
            }
            self.detach(replacement)?;
            let index = self.index_in_parent(id).ok_or(Error::Detached(id))?;
            self.insert_child(parent, index, replacement)?;
        }
        if !replacements.contains(&id) {
            self.detach(id)?;
        }
        Ok(())
    }

    fn leaf_text(&self, id: NodeId) -> Result<&str> {
        match &self.node(id)?.kind {
            NodeKind::Text(text) => Ok(text),
            NodeKind::Element(_) => Err(Error::NotText(id)),
        }
    }

    /// Check that `offset` is a char boundary within leaf `id`.
    pub fn check_offset(&self, id: NodeId, offset: usize) -> Result<()> {
        let text = self.leaf_text(id)?;
        if offset > text.len() || !text.is_char_boundary(offset) {
            return Err(Error::InvalidCoordinates {
                node: Some(id),
                offset,
                len: text.len(),
            });
        }
        Ok(())
    }

    /// Split a leaf at `offset`.
    ///
    /// The leaf keeps the text before `offset`; a new sibling right after it
    /// receives the rest and is returned. The tail may be empty.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId> {
        self.check_offset(id, offset)?;
        let parent = self.parent(id).ok_or(Error::Detached(id))?;
        let index = self.index_in_parent(id).ok_or(Error::Detached(id))?;
        let tail = match &mut self.node_mut(id)?.kind {
            NodeKind::Text(text) => text.split_off(offset),
            NodeKind::Element(_) => return Err(Error::NotText(id)),
        };
        let tail_id = self.alloc(NodeKind::Text(tail));
        self.insert_child(parent, index + 1, tail_id)?;
        Ok(tail_id)
    }

    /// Surround `start..end` of leaf `id` with a new marker container.
    ///
    /// The leaf keeps the text before `start` (possibly empty), so offsets
    /// below `start` in the same leaf stay valid. Returns the marker.
    pub fn wrap_in_marker(
        &mut self,
        id: NodeId,
        start: usize,
        end: usize,
        marker: Marker,
    ) -> Result<NodeId> {
        self.check_offset(id, start)?;
        self.check_offset(id, end)?;
        if start > end {
            return Err(Error::InvalidCoordinates {
                node: Some(id),
                offset: start,
                len: end,
            });
        }
        let middle = self.split_text(id, start)?;
        if end - start < self.leaf_text(middle)?.len() {
            self.split_text(middle, end - start)?;
        }
        let marker_id = self.create_marker(marker);
        self.replace_with(middle, &[marker_id])?;
        self.append_child(marker_id, middle)?;
        Ok(marker_id)
    }

    /// Replace a marker with a plain leaf carrying its text, merged with any
    /// adjacent text siblings. Returns the resulting leaf.
    pub fn unwrap_marker(&mut self, marker: NodeId) -> Result<NodeId> {
        if self.marker(marker).is_none() {
            self.node(marker)?;
            return Err(Error::NotMarker(marker));
        }
        let text = self.text_content(marker);
        let leaf = self.create_text(&text);
        self.replace_with(marker, &[leaf])?;
        self.merge_text_siblings(leaf)
    }

    /// Merge a leaf with adjacent text siblings; returns the surviving leaf.
    pub fn merge_text_siblings(&mut self, id: NodeId) -> Result<NodeId> {
        self.leaf_text(id)?;
        let mut survivor = id;
        if let Some(prev) = self.prev_sibling(id).filter(|&p| self.is_text(p)) {
            let text = self.leaf_text(id)?.to_string();
            self.push_text(prev, &text)?;
            self.detach(id)?;
            survivor = prev;
        }
        if let Some(next) = self.next_sibling(survivor).filter(|&n| self.is_text(n)) {
            let text = self.leaf_text(next)?.to_string();
            self.push_text(survivor, &text)?;
            self.detach(next)?;
        }
        Ok(survivor)
    }

    fn push_text(&mut self, id: NodeId, suffix: &str) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(text) => {
                text.push_str(suffix);
                Ok(())
            }
            NodeKind::Element(_) => Err(Error::NotText(id)),
        }
    }

    // ============================================
    // Serialization
    // ============================================

    /// Stable HTML-like rendering of a subtree, for tests and logs.
    ///
    /// Markers render as `<span class="...">`; text is escaped.
    #[must_use]
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        match self.nodes.get(id.index()).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => escape_into(text, out),
            Some(NodeKind::Element(element)) => {
                out.push('<');
                out.push_str(element.tag.name());
                if let Some(marker) = element.marker {
                    out.push_str(" class=\"");
                    out.push_str(marker.kind.class_name());
                    out.push('"');
                }
                out.push('>');
                for &child in self.children(id) {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(element.tag.name());
                out.push('>');
            }
            None => {}
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a DocumentTree,
    stack: Vec<NodeId>,
    skip_excluded: bool,
}

impl<'a> Descendants<'a> {
    fn new(tree: &'a DocumentTree, root: NodeId, skip_excluded: bool) -> Self {
        let stack = if tree.contains_id(root) {
            vec![root]
        } else {
            Vec::new()
        };
        Self {
            tree,
            stack,
            skip_excluded,
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        for &child in self.tree.children(current).iter().rev() {
            let rejected = self.skip_excluded
                && self
                    .tree
                    .tag(child)
                    .is_some_and(Tag::is_excluded_container);
            if !rejected {
                self.stack.push(child);
            }
        }
        Some(current)
    }
}

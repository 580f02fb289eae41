//! Test fixtures and helpers for leafmark integration tests.
//!
//! Documents are built from plain text where `*word*` marks an `<em>` run,
//! so a paragraph like `"Call me *Ishmael*."` becomes three leaves.

#![allow(clippy::nursery)] // Test fixtures prioritize clarity over pedantry
#![allow(clippy::pedantic)] // Test fixtures prioritize clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

use leafmark::{DocumentTree, NodeId, Tag};

/// Opening paragraphs of Moby-Dick, with emphasis marks.
pub const LOOMINGS: &str = include_str!("../e2e/fixtures/loomings.txt");

/// Node ids of a fixture chapter.
#[derive(Clone, Debug)]
pub struct Chapter {
    pub section: NodeId,
    pub heading: NodeId,
    pub paragraphs: Vec<NodeId>,
    pub script: NodeId,
}

/// Append a `<p>` built from `text`, turning `*runs*` into `<em>` children.
pub fn append_rich_paragraph(tree: &mut DocumentTree, parent: NodeId, text: &str) -> NodeId {
    let p = tree.append_element(parent, Tag::P).unwrap();
    for (i, part) in text.split('*').enumerate() {
        if part.is_empty() {
            continue;
        }
        if i % 2 == 1 {
            let em = tree.append_element(p, Tag::Em).unwrap();
            tree.append_text(em, part).unwrap();
        } else {
            tree.append_text(p, part).unwrap();
        }
    }
    p
}

/// `<section><h1>{title}</h1><p>..</p>..<script>..</script></section>`
pub fn chapter(title: &str, paragraphs: &[&str]) -> (DocumentTree, Chapter) {
    let mut tree = DocumentTree::new();
    let section = tree.append_element(tree.root(), Tag::Section).unwrap();
    let heading = tree.append_element(section, Tag::Heading(1)).unwrap();
    tree.append_text(heading, title).unwrap();
    let paragraphs = paragraphs
        .iter()
        .map(|text| append_rich_paragraph(&mut tree, section, text))
        .collect();
    let script = tree.append_element(section, Tag::Script).unwrap();
    tree.append_text(script, "if (whenever) { sea(); }").unwrap();
    (
        tree,
        Chapter {
            section,
            heading,
            paragraphs,
            script,
        },
    )
}

/// The Loomings chapter built from [`LOOMINGS`].
pub fn loomings() -> (DocumentTree, Chapter) {
    let paragraphs: Vec<&str> = LOOMINGS
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    chapter("Loomings", &paragraphs)
}

/// `<body><p>{text}</p></body>`, returning the paragraph and its leaf.
pub fn single_leaf(text: &str) -> (DocumentTree, NodeId, NodeId) {
    let mut tree = DocumentTree::new();
    let p = tree.append_element(tree.root(), Tag::P).unwrap();
    let leaf = tree.append_text(p, text).unwrap();
    (tree, p, leaf)
}

/// Content leaves under `root` in document order.
pub fn leaves(tree: &DocumentTree, root: NodeId) -> Vec<NodeId> {
    tree.content_descendants(root)
        .filter(|&n| tree.is_text(n))
        .collect()
}

/// Text of the whole fixture as the flattener sees it.
pub fn plain_text(source: &str) -> String {
    source.replace('*', "")
}

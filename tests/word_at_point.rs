//! Word-at-point lookup against real prose.
//!
//! Run with:
//!   cargo test --test `word_at_point` -- --nocapture

#![allow(clippy::pedantic)]

mod common;

use common::{leaves, loomings, single_leaf};
use leafmark::{
    DocumentTree, Error, MarkerKind, NodeId, Reader, ReaderOptions, ResolveOptions, Tag,
    resolve_word_at,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn resolve(tree: &mut DocumentTree, leaf: NodeId, offset: usize) -> Option<leafmark::WordHit> {
    resolve_word_at(tree, leaf, offset, &ResolveOptions::default()).unwrap()
}

/// The part of a hit a host would display, in a stable shape for snapshots.
#[derive(serde::Serialize)]
struct HitSummary {
    word: String,
    start: usize,
    end: usize,
    context: String,
}

#[test]
fn test_quick_brown_fox_scenario() {
    let (mut tree, p, leaf) = single_leaf("The quick brown fox jumps.");
    let hit = resolve(&mut tree, leaf, 4).unwrap();

    insta::assert_json_snapshot!(
        HitSummary { word: hit.word.clone(), start: hit.start, end: hit.end, context: hit.context.clone() },
        @r#"
    {
      "word": "quick",
      "start": 4,
      "end": 9,
      "context": "The quick brown fox jumps."
    }
    "#
    );

    let children = tree.children(p).to_vec();
    assert_eq!(children.len(), 3);
    assert_eq!(tree.text(children[0]), Some("The "));
    assert_eq!(children[1], hit.marker);
    assert_eq!(tree.text_content(hit.marker), "quick");
    assert_eq!(tree.text(children[2]), Some(" brown fox jumps."));
}

#[test]
fn test_leading_whitespace_finds_word_to_the_right() {
    let (mut tree, p, leaf) = single_leaf("   word");
    let hit = resolve(&mut tree, leaf, 0).unwrap();
    assert_eq!(hit.word, "word");
    assert_eq!(hit.context, "word");
    assert_eq!((hit.start, hit.end), (3, 7));
    assert_eq!(tree.children(p).len(), 2);
    assert_eq!(
        tree.to_markup(p),
        "<p>   <span class=\"clicked\">word</span></p>"
    );
}

#[test]
fn test_click_inside_emphasis() {
    let (mut tree, chapter) = loomings();
    let first = chapter.paragraphs[0];
    // "Call me ", <em>Ishmael</em>, ". Some years ago..."
    let em_leaf = leaves(&tree, first)[1];
    assert_eq!(tree.text(em_leaf), Some("Ishmael"));

    let hit = resolve(&mut tree, em_leaf, 3).unwrap();
    assert_eq!(hit.word, "Ishmael");
    // Context never crosses the leaf.
    assert_eq!(hit.context, "Ishmael");
    let em = tree.parent(hit.marker).unwrap();
    assert_eq!(tree.tag(em), Some(&Tag::Em));
}

#[test]
fn test_context_is_bounded_by_sentence() {
    let (mut tree, chapter) = loomings();
    let leaf = leaves(&tree, chapter.paragraphs[0])[2];
    let text = tree.text(leaf).unwrap().to_string();
    let offset = text.find("money").unwrap();

    let hit = resolve(&mut tree, leaf, offset).unwrap();
    assert_eq!(hit.word, "money");
    assert_eq!(
        hit.context,
        "precisely, having little or no money in my purse, and nothing"
    );
    let sentence = &text[hit.context_start..hit.context_end];
    assert!(sentence.starts_with("Some years ago"), "{sentence}");
    assert!(sentence.ends_with('.'));
}

#[test]
fn test_sentence_window_fallback() {
    // No terminators at all: the window edges become the sentence.
    let text = "word ".repeat(100);
    let (mut tree, _, leaf) = single_leaf(&text);
    let hit = resolve(&mut tree, leaf, 250).unwrap();
    assert_eq!((hit.start, hit.end), (250, 254));
    assert_eq!(hit.context_start, 50);
    assert_eq!(hit.context_end, 454);
    assert_eq!(hit.context, vec!["word"; 11].join(" "));
}

#[test]
fn test_reresolve_inside_marker() {
    let (mut tree, _, leaf) = single_leaf("The quick brown fox jumps.");
    let first = resolve(&mut tree, leaf, 6).unwrap();
    let inner = tree.children(first.marker)[0];
    let second = resolve(&mut tree, inner, 0).unwrap();
    assert_eq!(second.word, first.word);
    assert_eq!(tree.markers(tree.root(), MarkerKind::Clicked).len(), 2);
}

#[test]
fn test_clear_clicked_unwraps_nested_markers() {
    let (tree, p, leaf) = single_leaf("The quick brown fox jumps.");
    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);
    let first = reader.resolve_word_at(leaf, 6).unwrap().unwrap();
    let inner = reader.tree().unwrap().children(first.marker)[0];
    reader.resolve_word_at(inner, 2).unwrap().unwrap();

    assert_eq!(reader.clear_clicked().unwrap(), 2);
    let tree = reader.tree().unwrap();
    assert_eq!(tree.to_markup(p), "<p>The quick brown fox jumps.</p>");
    assert_eq!(tree.children(p).len(), 1);
}

#[test]
fn test_no_word_cases_leave_tree_alone() {
    let text = format!("a{}b", " ".repeat(30));
    let (mut tree, p, leaf) = single_leaf(&text);
    let before = tree.to_markup(p);
    assert_eq!(resolve(&mut tree, leaf, 15), None);
    assert_eq!(tree.to_markup(p), before);

    let (mut tree, _, leaf) = single_leaf("  \n\t ");
    assert_eq!(resolve(&mut tree, leaf, 1), None);

    let (mut tree, p, _) = single_leaf("words");
    assert_eq!(resolve(&mut tree, p, 0), None);
}

#[test]
fn test_errors() {
    let (mut tree, _, leaf) = single_leaf("whale");
    let options = ResolveOptions::default();
    assert!(matches!(
        resolve_word_at(&mut tree, leaf, 6, &options),
        Err(Error::InvalidCoordinates { .. })
    ));
    assert!(matches!(
        resolve_word_at(&mut tree, NodeId::from_raw(999), 0, &options),
        Err(Error::UnknownNode(_))
    ));

    let orphan = tree.create_text("stray whale");
    assert!(matches!(
        resolve_word_at(&mut tree, orphan, 0, &options),
        Err(Error::Detached(_))
    ));
}

#[test]
fn test_reader_clear_clicked_restores_text() {
    let (tree, chapter) = loomings();
    let first = chapter.paragraphs[0];
    let original = tree.to_markup(first);
    let leaf = leaves(&tree, first)[0];

    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);
    let hit = reader.resolve_word_at(leaf, 5).unwrap().unwrap();
    assert_eq!(hit.word, "me");
    assert_eq!(reader.clear_clicked().unwrap(), 1);
    assert_eq!(reader.tree().unwrap().to_markup(first), original);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Whatever the text and offset, a hit describes its own leaf text.
    #[test]
    fn hit_is_consistent_with_leaf(text in "[a-zé .!?\n]{0,60}", at in any::<Index>()) {
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let offset = *at.get(&offsets);
        let (mut tree, p, leaf) = single_leaf(&text);

        if let Some(hit) = resolve(&mut tree, leaf, offset) {
            prop_assert_eq!(&text[hit.start..hit.end], hit.word.as_str());
            prop_assert!(hit.word.chars().all(char::is_alphanumeric));
            prop_assert!(hit.context.contains(&hit.word));
            prop_assert!(hit.context_start <= hit.start && hit.end <= hit.context_end);
            // The fragments still spell the original text.
            prop_assert_eq!(tree.text_content(p), text);
        } else {
            prop_assert_eq!(tree.children(p), &[leaf]);
        }
    }
}

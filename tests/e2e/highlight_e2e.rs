//! E2E tests for the highlight pipeline: flatten, match, wrap, unwrap.
//!
//! Run with:
//!   cargo test --test `highlight_e2e` -- --nocapture
//! With logging:
//!   `RUST_LOG=debug` cargo test --test `highlight_e2e` -- --nocapture

use leafmark::highlight::{self, build_pattern};
use leafmark::walker::{self, Region, strategy};
use leafmark::{
    HighlightOptions, MarkerKind, Point, Reader, ReaderOptions, Rgba, Style, TextRange,
};
use tracing::{Level, debug, info, span};

use crate::common::{leaves, loomings, single_leaf};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

#[test]
fn e2e_loomings_term_counts() {
    init_logging();
    let span = span!(Level::INFO, "e2e_loomings_term_counts");
    let _enter = span.enter();

    let (tree, chapter) = loomings();
    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);

    let counts = reader.highlight(Some("Whenever")).unwrap();
    info!(?counts, "highlighted single term");
    assert_eq!(counts.get("whenever"), Some(&4));

    let tree = reader.tree().unwrap();
    assert_eq!(tree.markers(chapter.section, MarkerKind::Highlight).len(), 4);
    assert!(tree.markers(chapter.script, MarkerKind::Highlight).is_empty());
}

#[test]
fn e2e_tracked_set_frequencies() {
    init_logging();
    let (tree, _) = loomings();
    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);
    reader.set_highlighted_words(["sea", "Ishmael", "whenever", "leviathan"]);

    let counts = reader.highlight(None).unwrap();
    insta::assert_json_snapshot!(counts, @r#"
    {
      "ishmael": 1,
      "sea": 1,
      "whenever": 4
    }
    "#);
}

#[test]
fn e2e_highlight_then_unhighlight_any_case() {
    init_logging();
    let (tree, p, _) = single_leaf("The Whale breached. A whale, a WHALE!");
    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);

    reader.highlight(Some("Whale")).unwrap();
    insta::assert_snapshot!(
        reader.tree().unwrap().to_markup(p),
        @r#"<p>The <span class="highlight-word">Whale</span> breached. A <span class="highlight-word">whale</span>, a <span class="highlight-word">WHALE</span>!</p>"#
    );

    assert_eq!(reader.unhighlight("whale").unwrap(), 3);
    assert!(!reader.highlighted_words().any(|w| w == "whale"));
    let tree = reader.tree().unwrap();
    insta::assert_snapshot!(tree.to_markup(p), @"<p>The Whale breached. A whale, a WHALE!</p>");
    assert_eq!(tree.children(p).len(), 1);
}

#[test]
fn e2e_many_matches_in_one_leaf() {
    init_logging();
    let (mut tree, p, _) = single_leaf("sea, sea, sea and sea");
    let root = tree.root();
    let pattern = build_pattern(["sea"]).unwrap().unwrap();
    let applied = highlight::apply_highlights(&mut tree, root, &pattern, Style::HIGHLIGHT).unwrap();
    debug!(markers = applied.markers.len(), "wrapped");
    assert_eq!(applied.markers.len(), 4);
    insta::assert_snapshot!(
        tree.to_markup(p),
        @r#"<p><span class="highlight-word">sea</span>, <span class="highlight-word">sea</span>, <span class="highlight-word">sea</span> and <span class="highlight-word">sea</span></p>"#
    );
}

#[test]
fn e2e_highlight_after_navigation_is_stable() {
    init_logging();
    let (tree, chapter) = loomings();
    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);
    reader.set_highlighted_words(["the"]);

    let first = reader.highlight(None).unwrap();
    let markup = reader.tree().unwrap().to_markup(chapter.section);
    let second = reader.highlight(None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.get("the"), Some(&11));
    assert_eq!(reader.tree().unwrap().to_markup(chapter.section), markup);
}

#[test]
fn e2e_unhighlight_is_scoped_to_container() {
    init_logging();
    let (tree, chapter) = loomings();
    let (first, second) = (chapter.paragraphs[0], chapter.paragraphs[1]);
    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);
    reader.highlight(Some("the")).unwrap();

    let tree = reader.tree().unwrap();
    let leaf = leaves(tree, second)[0];
    let len = tree.text(leaf).unwrap().len();
    reader.relocate(&TextRange::in_leaf(leaf, 0, len)).unwrap();
    assert_eq!(reader.container(), Some(second));

    assert_eq!(reader.unhighlight("THE").unwrap(), 4);
    let tree = reader.tree().unwrap();
    assert_eq!(tree.markers(first, MarkerKind::Highlight).len(), 7);
    assert!(tree.markers(second, MarkerKind::Highlight).is_empty());
}

#[test]
fn e2e_phrase_across_emphasis() {
    init_logging();
    let (tree, chapter) = loomings();
    let first = chapter.paragraphs[0];
    let index = walker::flatten(&tree, &Region::Subtree(first)).unwrap();
    let phrase = regex::Regex::new(r"(?i)call me ishmael\.").unwrap();

    // Per-leaf matching cannot see the phrase; the joined stream can.
    let per_leaf = index
        .search(|texts, _| strategy::leaf_matches(&phrase, texts))
        .count();
    assert_eq!(per_leaf, 0);

    let ranges: Vec<TextRange> = index
        .search(|texts, ranges| {
            strategy::joined_matches(&phrase, texts).map(move |m| m.range(ranges))
        })
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ranges.len(), 1);
    let range = ranges[0];
    assert_eq!(tree.range_text(&range).unwrap(), "Call me Ishmael.");
    let first_leaf = leaves(&tree, first)[0];
    assert_eq!(range.start, Point::new(first_leaf, 0));
    assert_ne!(range.start.node, range.end.node);
}

#[test]
fn e2e_search_stops_early() {
    init_logging();
    let (tree, _) = loomings();
    let index = walker::flatten(&tree, &Region::Document).unwrap();
    let word = regex::Regex::new(r"\w+").unwrap();
    let mut matches = index.search(|texts, _| strategy::leaf_matches(&word, texts));
    let firsts: Vec<_> = matches.by_ref().take(3).map(|m| m.text).collect();
    assert_eq!(firsts, vec!["Loomings", "Call", "me"]);
    assert_eq!(matches.produced(), 3);
}

#[test]
fn e2e_marker_styles_follow_options() {
    init_logging();
    let (tree, p, leaf) = single_leaf("Call me Ishmael.");
    let custom = Style::builder()
        .bg(Rgba::from_hex("#cde").unwrap())
        .bold()
        .build();
    let options = ReaderOptions::default()
        .with_highlight_options(HighlightOptions::default().with_marker_style(custom));
    let mut reader = Reader::new(options);
    reader.load(tree);

    reader.highlight(Some("ishmael")).unwrap();
    let hit = reader.resolve_word_at(leaf, 0).unwrap().unwrap();

    let tree = reader.tree().unwrap();
    let highlight = tree.markers(p, MarkerKind::Highlight)[0];
    let styles: Vec<String> = [highlight, hit.marker]
        .iter()
        .map(|&m| tree.marker(m).unwrap().style.to_css())
        .collect();
    insta::assert_debug_snapshot!(styles, @r#"
    [
        "background-color: #ccddee; font-weight: bold",
        "text-decoration: underline",
    ]
    "#);
}

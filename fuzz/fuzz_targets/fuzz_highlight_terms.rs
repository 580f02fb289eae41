//! Fuzz target for highlight term handling.
//!
//! Arbitrary terms must always escape into a valid pattern, and applying
//! then removing them must restore the document text.

#![no_main]

use leafmark::highlight::{apply_highlights, build_pattern, remove_highlight};
use leafmark::{DocumentTree, Style, Tag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<&str>, &str)| {
    let (terms, text) = input;
    if terms.len() > 16 {
        return;
    }
    let Ok(pattern) = build_pattern(&terms) else {
        return;
    };
    let Some(pattern) = pattern else {
        assert!(terms.iter().all(|t| t.trim().is_empty()));
        return;
    };

    let mut tree = DocumentTree::new();
    let root = tree.root();
    let Ok(p) = tree.append_element(root, Tag::P) else {
        return;
    };
    if tree.append_text(p, text).is_err() {
        return;
    }
    let Ok(applied) = apply_highlights(&mut tree, root, &pattern, Style::HIGHLIGHT) else {
        return;
    };
    for term in applied.frequencies.keys() {
        let _ = remove_highlight(&mut tree, root, term);
    }
    assert_eq!(tree.text_content(p), text);
});

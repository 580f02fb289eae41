//! Fuzz target for word-at-point lookup.
//!
//! Any leaf text and any offset must give a word, nothing, or an error,
//! and the fragments left in the tree must spell the original text.

#![no_main]

use leafmark::{DocumentTree, ResolveOptions, Tag, resolve_word_at};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u16)| {
    let (text, offset) = input;
    let mut tree = DocumentTree::new();
    let Ok(p) = tree.append_element(tree.root(), Tag::P) else {
        return;
    };
    let Ok(leaf) = tree.append_text(p, text) else {
        return;
    };

    // Offsets inside a scalar or past the end are rejected, not clamped
    let offset = usize::from(offset);
    match resolve_word_at(&mut tree, leaf, offset, &ResolveOptions::default()) {
        Ok(Some(hit)) => {
            assert_eq!(&text[hit.start..hit.end], hit.word);
            assert_eq!(tree.text_content(p), text);
        }
        Ok(None) => assert_eq!(tree.children(p), &[leaf]),
        Err(_) => assert!(offset > text.len() || !text.is_char_boundary(offset)),
    }
});

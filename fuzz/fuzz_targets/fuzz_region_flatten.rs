//! Fuzz target for region flattening and range reconstruction.
//!
//! Builds a small tree from arbitrary leaf texts, then flattens a region
//! between two arbitrary points and rebuilds ranges from arbitrary
//! coordinates. Nothing may panic, and bounded text must agree with the
//! tree's own range text.

#![no_main]

use arbitrary::Arbitrary;
use leafmark::walker::{Region, flatten};
use leafmark::{DocumentTree, Point, Tag, TextRange};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    leaves: Vec<(&'a str, bool)>,
    start: (u8, u16),
    end: (u8, u16),
    coords: [(u8, u16); 2],
}

fuzz_target!(|input: Input<'_>| {
    if input.leaves.is_empty() || input.leaves.len() > 64 {
        return;
    }
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let mut ids = Vec::new();
    for &(text, emphasized) in &input.leaves {
        let parent = if emphasized {
            match tree.append_element(root, Tag::Em) {
                Ok(em) => em,
                Err(_) => return,
            }
        } else {
            root
        };
        match tree.append_text(parent, text) {
            Ok(id) => ids.push(id),
            Err(_) => return,
        }
    }

    let point = |(i, offset): (u8, u16)| {
        Point::new(ids[usize::from(i) % ids.len()], usize::from(offset))
    };
    let range = TextRange::new(point(input.start), point(input.end));

    let Ok(index) = flatten(&tree, &Region::from_range(&range)) else {
        return;
    };
    if let Ok(text) = tree.range_text(&range) {
        assert_eq!(index.joined(), text);
    }

    let [(si, so), (ei, eo)] = input.coords;
    let _ = index.range_maker().make_range(
        usize::from(si),
        usize::from(so),
        usize::from(ei),
        usize::from(eo),
    );
});

//! Events and logs emitted by the reader.
//!
//! Callbacks are process-wide, so everything lives in one test and this file
//! is the only test binary that installs them.

#![allow(clippy::pedantic)]

mod common;

use common::{leaves, loomings};
use leafmark::event::{clear_event_callback, clear_log_callback, names};
use leafmark::{LogLevel, Reader, ReaderOptions, TextRange, set_event_callback, set_log_callback};
use std::sync::{Arc, Mutex};

#[test]
fn test_reader_operations_emit_events() {
    let events = Arc::new(Mutex::new(Vec::<(String, String)>::new()));
    let logs = Arc::new(Mutex::new(Vec::<(LogLevel, String)>::new()));
    let sink = Arc::clone(&events);
    set_event_callback(move |name, data| {
        sink.lock().unwrap().push((name.to_string(), data.to_string()));
    });
    let sink = Arc::clone(&logs);
    set_log_callback(move |level, message| {
        sink.lock().unwrap().push((level, message.to_string()));
    });

    let (tree, chapter) = loomings();
    let second = chapter.paragraphs[1];
    let leaf = leaves(&tree, second)[0];
    let len = tree.text(leaf).unwrap().len();

    let mut reader = Reader::new(ReaderOptions::default());
    reader.load(tree);
    reader.relocate(&TextRange::in_leaf(leaf, 0, len)).unwrap();
    reader.set_highlighted_words(["waves", "coral"]);
    reader.highlight(None).unwrap();
    reader.unhighlight("coral").unwrap();
    let hit = reader.resolve_word_at(leaf, 6).unwrap().unwrap();
    reader.clear_clicked().unwrap();

    clear_event_callback();
    clear_log_callback();

    let events = events.lock().unwrap().clone();
    let names_seen: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names_seen,
        vec![
            names::LOAD,
            names::RELOCATE,
            names::HIGHLIGHT,
            names::UNHIGHLIGHT,
            names::WORD,
            names::CLEAR_CLICKED,
        ]
    );
    // heading, five leaves in the first paragraph, one in the second
    assert_eq!(events[0].1, "7");
    assert_eq!(events[1].1, second.to_string());
    assert_eq!(events[2].1, "coral=1,waves=1");
    assert_eq!(events[3].1, "coral=1");
    assert_eq!(events[4].1, hit.word);
    assert_eq!(events[5].1, "1");

    let logs = logs.lock().unwrap();
    assert!(
        logs.iter()
            .any(|(level, message)| *level == LogLevel::Info && message.contains("7 leaves"))
    );
    assert!(logs.iter().any(|(level, _)| *level == LogLevel::Debug));
}

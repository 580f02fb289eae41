//! `leafmark` - text addressing for rendered reading surfaces
//!
//! Treats a tree of containers and text leaves as one contiguous string:
//! flatten a region into leaf texts, match across leaf boundaries, map the
//! matches back onto the original leaves, and splice decorations into the
//! tree without disturbing the text around them. On top of that sit
//! term highlighting with per-term counts and word-at-point lookup with
//! sentence context.
//!
//! # Examples
//!
//! ```
//! use leafmark::{DocumentTree, ResolveOptions, Tag, resolve_word_at};
//!
//! let mut tree = DocumentTree::new();
//! let p = tree.append_element(tree.root(), Tag::P).unwrap();
//! let leaf = tree.append_text(p, "The quick brown fox jumps.").unwrap();
//!
//! let hit = resolve_word_at(&mut tree, leaf, 4, &ResolveOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(hit.word, "quick");
//! assert_eq!(
//!     tree.to_markup(p),
//!     "<p>The <span class=\"clicked\">quick</span> brown fox jumps.</p>"
//! );
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // NodeId is a u32 arena index
#![allow(clippy::module_name_repetitions)] // Allow highlight::HighlightOptions etc
#![allow(clippy::missing_errors_doc)] // Errors are listed on the Error enum
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod color;
pub mod error;
pub mod event;
pub mod highlight;
pub mod reader;
pub mod style;
pub mod tree;
pub mod unicode;
pub mod walker;
pub mod word;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use style::{Style, TextAttributes};

// Re-export tree types
pub use tree::{
    DocumentTree, Element, Marker, MarkerKind, NodeId, NodeKind, Point, Tag, TextRange,
};

// Re-export the text-addressing pipeline
pub use highlight::{Frequencies, HighlightOptions, HighlightSession};
pub use reader::{Reader, ReaderOptions};
pub use walker::{FlattenedIndex, Matches, RangeMaker, Region, flatten};
pub use word::{ResolveOptions, WordHit, resolve_word_at};

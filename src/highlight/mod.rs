//! Term highlighting over a document tree.
//!
//! [`build_pattern`] turns a term set into one regex, [`apply_highlights`]
//! wraps every occurrence in a [`MarkerKind::Highlight`] marker and counts
//! them, and [`remove_highlight`] unwraps the markers of one term. A
//! [`HighlightSession`] remembers which terms are highlighted across calls.
//!
//! [`MarkerKind::Highlight`]: crate::tree::MarkerKind::Highlight

mod apply;
mod pattern;
mod session;

pub use apply::{
    Applied, Frequencies, Occurrence, apply_highlights, find_occurrences, remove_highlight,
    wrap_occurrences,
};
pub use pattern::build_pattern;
pub use session::HighlightSession;

use crate::style::Style;

/// Options for highlight markers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightOptions {
    /// Visual treatment of highlight markers. Default black on yellow.
    pub marker_style: Style,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            marker_style: Style::HIGHLIGHT,
        }
    }
}

impl HighlightOptions {
    #[must_use]
    pub const fn with_marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }
}

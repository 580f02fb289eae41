//! Visual treatment carried by markers.
//!
//! A [`Style`] is stored on every marker node so the host can render
//! highlight and clicked-word markers without its own lookup table. The
//! crate never interprets it beyond [`Style::to_css`].
//!
//! # Examples
//!
//! ```
//! use leafmark::{Rgba, Style};
//!
//! assert_eq!(Style::HIGHLIGHT.to_css(), "background-color: #ffff00; color: #000000");
//!
//! let custom = Style::builder().bg(Rgba::from_hex("#cde").unwrap()).bold().build();
//! assert_eq!(custom.to_css(), "background-color: #ccddee; font-weight: bold");
//! ```

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Font and decoration flags.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        const BOLD          = 0x01;
        const ITALIC        = 0x02;
        const UNDERLINE     = 0x04;
        const STRIKETHROUGH = 0x08;
    }
}

/// Colours and attributes applied to a marker's contents.
///
/// `None` for a colour means "inherit from the surrounding text".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Rgba>,
    pub bg: Option<Rgba>,
    pub attributes: TextAttributes,
}

impl Style {
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    /// Black text on a yellow background, the highlight marker treatment.
    pub const HIGHLIGHT: Self = Self {
        fg: Some(Rgba::BLACK),
        bg: Some(Rgba::YELLOW),
        attributes: TextAttributes::empty(),
    };

    /// Underlined, inheriting colours; the clicked-word treatment.
    pub const CLICKED: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::UNDERLINE,
    };

    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Inline CSS declarations, empty for [`Style::NONE`].
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(bg) = self.bg {
            decls.push(format!("background-color: {bg}"));
        }
        if let Some(fg) = self.fg {
            decls.push(format!("color: {fg}"));
        }
        let attrs = self.attributes;
        if attrs.contains(TextAttributes::BOLD) {
            decls.push("font-weight: bold".to_string());
        }
        if attrs.contains(TextAttributes::ITALIC) {
            decls.push("font-style: italic".to_string());
        }
        let lines: Vec<&str> = [
            (TextAttributes::UNDERLINE, "underline"),
            (TextAttributes::STRIKETHROUGH, "line-through"),
        ]
        .into_iter()
        .filter(|(flag, _)| attrs.contains(*flag))
        .map(|(_, line)| line)
        .collect();
        if !lines.is_empty() {
            decls.push(format!("text-decoration: {}", lines.join(" ")));
        }
        decls.join("; ")
    }
}

/// Fluent construction of a [`Style`].
#[derive(Clone, Debug, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    #[must_use]
    pub const fn fg(mut self, color: Rgba) -> Self {
        self.style.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Rgba) -> Self {
        self.style.bg = Some(color);
        self
    }

    /// Add attribute flags to whatever is already set.
    #[must_use]
    pub fn attributes(mut self, attrs: TextAttributes) -> Self {
        self.style.attributes |= attrs;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.attributes(TextAttributes::BOLD)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.attributes(TextAttributes::UNDERLINE)
    }

    #[must_use]
    pub const fn build(self) -> Style {
        self.style
    }
}

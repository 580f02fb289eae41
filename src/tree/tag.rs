//! Element tag identities.

use std::fmt;

/// Tag identity of an element node.
///
/// Names parse case-insensitively; anything unrecognised is kept verbatim
/// (lower-cased) in [`Tag::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Body,
    Section,
    Article,
    Div,
    P,
    Span,
    A,
    Em,
    Strong,
    /// `h1`..`h6`.
    Heading(u8),
    Ul,
    Ol,
    Li,
    Blockquote,
    Pre,
    Code,
    Aside,
    Script,
    Style,
    Other(String),
}

impl Tag {
    /// Parse a tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "html" => Self::Html,
            "head" => Self::Head,
            "body" => Self::Body,
            "section" => Self::Section,
            "article" => Self::Article,
            "div" => Self::Div,
            "p" => Self::P,
            "span" => Self::Span,
            "a" => Self::A,
            "em" => Self::Em,
            "strong" => Self::Strong,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "li" => Self::Li,
            "blockquote" => Self::Blockquote,
            "pre" => Self::Pre,
            "code" => Self::Code,
            "aside" => Self::Aside,
            "script" => Self::Script,
            "style" => Self::Style,
            _ => Self::Other(lower),
        }
    }

    /// Lower-case tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Section => "section",
            Self::Article => "article",
            Self::Div => "div",
            Self::P => "p",
            Self::Span => "span",
            Self::A => "a",
            Self::Em => "em",
            Self::Strong => "strong",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::Blockquote => "blockquote",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Aside => "aside",
            Self::Script => "script",
            Self::Style => "style",
            Self::Other(name) => name,
        }
    }

    /// Whether the flattener rejects this container and its whole subtree.
    ///
    /// Only script and style containers qualify: their text is never content.
    #[must_use]
    pub fn is_excluded_container(&self) -> bool {
        matches!(self, Self::Script | Self::Style)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! CSS colours for marker treatments.
//!
//! Markers carry a [`Style`](crate::Style) that the host renders as inline
//! CSS, so [`Rgba`] keeps 8-bit channels and reads and writes the hex and
//! `rgba()` forms.
//!
//! # Examples
//!
//! ```
//! use leafmark::Rgba;
//!
//! assert_eq!(Rgba::from_hex("#ffff00"), Some(Rgba::YELLOW));
//! assert_eq!(Rgba::YELLOW.to_css(), "#ffff00");
//! assert_eq!(Rgba::BLACK.with_alpha(128).to_css(), "rgba(0, 0, 0, 0.5)");
//! ```

use std::fmt;

/// An sRGB colour with 8-bit channels; `a == 255` is opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Default highlight background.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`; the `#` is optional.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let pair = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            3 => {
                let mut short = digits
                    .chars()
                    .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d * 17).ok()));
                Some(Self::rgb(short.next()??, short.next()??, short.next()??))
            }
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?).with_alpha(pair(6)?)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// `#rrggbb` when opaque, `rgba(r, g, b, a)` with alpha to two places
    /// otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let Self { r, g, b, a } = self;
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let alpha = (f32::from(a) / 255.0 * 100.0).round() / 100.0;
            format!("rgba({r}, {g}, {b}, {alpha})")
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

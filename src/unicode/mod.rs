//! Unicode utilities for word classification and term folding.

mod grapheme;
mod normalize;

pub use grapheme::{
    TextUnits, is_sentence_terminator, is_whitespace_unit, is_word_char, is_word_unit,
};
pub use normalize::{fold_case, normalize_nfc, same_term};

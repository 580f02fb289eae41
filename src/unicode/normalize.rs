//! Unicode normalization and case folding for term comparison.

use unicode_normalization::UnicodeNormalization;

/// Normalize `text` to NFC (canonical composition).
#[must_use]
pub fn normalize_nfc(text: &str) -> String {
    text.nfc().collect()
}

/// Fold a term for case-insensitive comparison: NFC, then lower case.
///
/// Frequency keys, the highlighted-term set and marker comparisons all use
/// this form.
#[must_use]
pub fn fold_case(text: &str) -> String {
    normalize_nfc(text).to_lowercase()
}

/// Whether two terms are equal after folding.
#[must_use]
pub fn same_term(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_nfc_combining_to_composed() {
        let input = "e\u{0301}";
        assert_eq!(normalize_nfc(input), "é");
    }

    #[test]
    fn fold_case_lowercases_and_composes() {
        assert_eq!(fold_case("WHALE"), "whale");
        assert_eq!(fold_case("CAFE\u{0301}"), "café");
    }

    #[test]
    fn same_term_ignores_case_and_composition() {
        assert!(same_term("Whale", "wHALE"));
        assert!(same_term("cafe\u{0301}", "CAFÉ"));
        assert!(!same_term("whale", "whales"));
    }
}

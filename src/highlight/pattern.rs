//! Term alternation patterns.

use crate::error::Result;
use crate::unicode::{fold_case, is_word_char};
use regex::Regex;

/// Compile one case-insensitive alternation matching any of `terms`.
///
/// Terms are escaped, so they always match literally. Each end of a term that
/// is a word character gets a `\b` anchor, so `white whale` cannot match
/// inside `white whales` while `C++` is anchored only before the `C`.
/// Longer terms come first so a term is never shadowed by one of its own
/// prefixes. Blank terms are ignored and case variants of the same
/// term collapse into one branch.
///
/// Returns `Ok(None)` when no usable term is left.
pub fn build_pattern<I, S>(terms: I) -> Result<Option<Regex>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut branches: Vec<(String, String)> = Vec::new();
    for term in terms {
        let term = term.as_ref().trim();
        if term.is_empty() {
            continue;
        }
        let key = fold_case(term);
        if branches.iter().any(|(k, _)| *k == key) {
            continue;
        }
        branches.push((key, branch_for(term)));
    }
    if branches.is_empty() {
        return Ok(None);
    }

    branches.sort_by(|(a, _), (b, _)| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    let alternation = branches
        .iter()
        .map(|(_, branch)| branch.as_str())
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&format!("(?i){alternation}"))?))
}

fn branch_for(term: &str) -> String {
    let anchor = |c: Option<char>| if c.is_some_and(is_word_char) { r"\b" } else { "" };
    let lead = anchor(term.chars().next());
    let trail = anchor(term.chars().next_back());
    format!("{lead}{}{trail}", regex::escape(term))
}

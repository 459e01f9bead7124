//! Capital-name answer matching.
//!
//! Answers come from voice transcription or free-form typing, so matching is
//! deliberately forgiving: accents, hyphenation, extra whitespace and case
//! are all ignored before comparing.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize an answer for comparison.
///
/// Pipeline: NFKD-decompose and drop combining marks (accent stripping),
/// replace hyphens with spaces, collapse whitespace runs, trim, lowercase.
pub fn normalize(answer: &str) -> String {
    let folded: String = answer
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();

    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compare a user answer against the expected capital name.
pub fn answers_match(expected: &str, actual: &str) -> bool {
    normalize(expected) == normalize(actual)
}

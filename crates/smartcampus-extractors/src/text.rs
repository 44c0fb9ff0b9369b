//! Fragment joining and whitespace normalization shared by the scanners.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Join fragments with single spaces, then collapse whitespace.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let joined = fragments
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}

/// Length in characters, the unit every acceptance threshold uses.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

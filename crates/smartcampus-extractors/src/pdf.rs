//! Heuristic PDF text recovery.
//!
//! PDFs are not parsed as an object graph. The raw file is decoded lossily and
//! scanned twice for parenthesized string literals:
//!
//! 1. inside `BT … ET` text objects;
//! 2. inside `[ … ] TJ` show-text arrays.
//!
//! Flate-compressed content streams are not decoded, so any text they hold is
//! simply not found.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::text::join_fragments;

static TEXT_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)BT.*?ET").unwrap());

static SHOW_TEXT_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\s*TJ").unwrap());

static STRING_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

/// Candidates from each scan, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfScan {
    /// Accepted literals found inside `BT … ET` blocks.
    pub text_objects: Vec<String>,
    /// Accepted literals found inside `[ … ] TJ` arrays.
    pub show_text_arrays: Vec<String>,
}

impl PdfScan {
    /// Total number of accepted candidates.
    pub fn len(&self) -> usize {
        self.text_objects.len() + self.show_text_arrays.len()
    }

    /// Check if neither scan accepted anything.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join text-object candidates then array candidates into normalized text.
    pub fn into_text(self) -> String {
        let mut fragments = self.text_objects;
        fragments.extend(self.show_text_arrays);
        join_fragments(&fragments)
    }
}

/// Run both scans over raw PDF bytes.
pub fn scan(bytes: &[u8]) -> PdfScan {
    let raw = String::from_utf8_lossy(bytes);

    let text_objects = TEXT_OBJECT
        .find_iter(&raw)
        .flat_map(|block| accepted_literals(block.as_str()))
        .collect::<Vec<_>>();

    let show_text_arrays = SHOW_TEXT_ARRAY
        .find_iter(&raw)
        .flat_map(|array| accepted_literals(array.as_str()))
        .collect::<Vec<_>>();

    debug!(
        text_objects = text_objects.len(),
        show_text_arrays = show_text_arrays.len(),
        "Scanned PDF bytes"
    );

    PdfScan {
        text_objects,
        show_text_arrays,
    }
}

/// Extract normalized text from raw PDF bytes. Returns an empty string when
/// nothing acceptable is found.
pub fn extract_text(bytes: &[u8]) -> String {
    scan(bytes).into_text()
}

fn accepted_literals(region: &str) -> Vec<String> {
    STRING_LITERAL
        .captures_iter(region)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|candidate| is_plausible_text(candidate))
        .map(str::to_string)
        .collect()
}

/// More than one character, all printable ASCII or whitespace.
///
/// Whitespace is Unicode `White_Space`, which admits U+0085 and rejects
/// U+FEFF. Neither shows up in real page text.
fn is_plausible_text(candidate: &str) -> bool {
    candidate.chars().nth(1).is_some()
        && candidate
            .chars()
            .all(|c| (' '..='~').contains(&c) || c.is_whitespace())
}

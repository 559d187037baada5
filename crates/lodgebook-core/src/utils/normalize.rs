//! Text normalization for label and name matching.
//!
//! Backend records carry free-text status labels and person names with
//! inconsistent casing and accents ("Suspendido", "suspendido", "Suspendído").
//! Every comparison in the engine goes through these helpers so the matching
//! rules live in exactly one place.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip accents by decomposing to NFD and dropping combining marks.
pub fn fold_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalize a status/classification label: trim, fold accents, lowercase.
pub fn normalize_label(input: &str) -> String {
    fold_diacritics(input.trim()).to_lowercase()
}

/// Normalize a person name for deduplication: same folding as labels,
/// plus internal whitespace collapsed to single spaces.
pub fn normalize_name(input: &str) -> String {
    normalize_label(input)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

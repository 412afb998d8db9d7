//! Text normalisation: collapse whitespace before field matching.
//!
//! PDF text extraction emits line breaks wherever the layout wrapped,
//! runs of spaces where columns were aligned, and stray tabs. The field
//! extractors only care about tokens, so everything is folded into single
//! spaces first.
//!
//! ## Rule Order
//!
//! 1. every run of `\n` becomes one space
//! 2. every run of any whitespace becomes one space
//! 3. leading and trailing whitespace is trimmed
//!
//! [`clean_text`] optionally runs a fourth pass that drops decorative
//! punctuation.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Everything except word chars, whitespace, and `@ . - # ( )`.
static RE_SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s@.\-#()]").unwrap());

/// Normalise resume text: newlines and whitespace runs become single
/// spaces, then the result is trimmed.
///
/// Total: empty input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let s = RE_NEWLINES.replace_all(text, " ");
    let s = RE_WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}

/// Normalise, then optionally drop special characters.
///
/// Stripping runs after normalisation, so removing a lone symbol between
/// two spaces leaves a double space behind.
pub fn clean_text(text: &str, strip_special: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    let s = normalize_text(text);
    if strip_special {
        RE_SPECIAL.replace_all(&s, "").into_owned()
    } else {
        s
    }
}

//! Field extractors: one heuristic matcher per resume field.
//!
//! Every extractor is a pure function of the text (plus the keyword table
//! for education and skills) and returns `Option`/`Vec` rather than an
//! error. Keyword matching is plain case-insensitive substring search, so
//! short keywords also hit inside longer words ("Go" in "Google").

use crate::keywords::KeywordTable;
use once_cell::sync::Lazy;
use regex::Regex;

/// Email pattern, matched case-insensitively.
pub const EMAIL_PATTERN: &str = r"[\w\.-]+@[\w\.-]+\.\w+";

/// Phone pattern: bare 10 digits, `+CC` international, or `(ddd) ddd-dddd`.
pub const PHONE_PATTERN: &str =
    r"\b\d{10}\b|\+\d{1,3}[-.\s]?\d{10}\b|\(\d{3}\)\s?\d{3}[-.\s]?\d{4}";

/// Characters of the head window scanned for a name when the text has no newline.
pub const NAME_WINDOW_CHARS: usize = 100;

/// Tokens of the head window considered as name candidates.
const NAME_CANDIDATE_TOKENS: usize = 5;

/// Candidate tokens joined into the name.
const NAME_TOKENS: usize = 2;

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("(?i){EMAIL_PATTERN}")).unwrap());

static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).unwrap());

/// Guess the candidate's name from the head of the text.
///
/// Takes the first line (or the first 100 characters if there is no line
/// break), drops single-character tokens, keeps capitalised or all-caps
/// tokens among the first five, and joins the first two.
pub fn extract_name(text: &str) -> Option<String> {
    let head: String = match text.split_once('\n') {
        Some((first, _)) => first.to_string(),
        None => text.chars().take(NAME_WINDOW_CHARS).collect(),
    };

    let name: Vec<&str> = head
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .take(NAME_CANDIDATE_TOKENS)
        .filter(|w| starts_uppercase(w) || is_all_caps(w))
        .take(NAME_TOKENS)
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(name.join(" "))
    }
}

/// First email address, lower-cased.
pub fn extract_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_lowercase())
}

/// First phone number, verbatim.
pub fn extract_phone(text: &str) -> Option<String> {
    RE_PHONE.find(text).map(|m| m.as_str().to_string())
}

/// First education keyword (in table order) present in the text.
pub fn extract_education(text: &str, keywords: &KeywordTable) -> Option<String> {
    let haystack = text.to_lowercase();
    keywords
        .education
        .iter()
        .find(|k| haystack.contains(&k.to_lowercase()))
        .cloned()
}

/// Every skill keyword present in the text, in table order, deduplicated.
pub fn extract_skills(text: &str, keywords: &KeywordTable) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for skill in &keywords.skills {
        if haystack.contains(&skill.to_lowercase()) && !found.contains(skill) {
            found.push(skill.clone());
        }
    }
    found
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

// At least one cased character and no lowercase ones ("IBM", "O'NEIL").
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

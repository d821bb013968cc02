//! Text normalization for extracted page text.
//!
//! `normalize` is pure and idempotent: applying it to its own output returns
//! the same string.

use std::sync::LazyLock;

use regex::Regex;

use super::selector::compile_regex_unsafe;

static DISALLOWED_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"[^\w\s.,!?;:\-()\[\]{}"'/@#$%&*+=<>]"#,
        "DISALLOWED_CHARS_RE",
    )
});
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"\s+", "WHITESPACE_RE"));
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"\s+([.!?,:;])", "SPACE_BEFORE_PUNCT_RE"));
// A repeated capture group keeps its last iteration, so `$1` is the final mark.
static REPEATED_TERMINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"([.!?]){2,}", "REPEATED_TERMINAL_RE"));
static REPEATED_LIST_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"([,;:]){2,}", "REPEATED_LIST_PUNCT_RE"));
static SENTENCE_SPACING_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"([.!?])\s+", "SENTENCE_SPACING_RE"));

fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Cleans extracted text.
///
/// Steps, in order: straighten curly quotes, blank out characters outside the
/// allowed set, collapse whitespace, drop whitespace before punctuation,
/// collapse repeated punctuation, single space after sentence punctuation,
/// trim.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = straighten_quotes(text);
    let text = DISALLOWED_CHARS_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT_RE.replace_all(&text, "$1");
    let text = REPEATED_TERMINAL_RE.replace_all(&text, "$1");
    let text = REPEATED_LIST_PUNCT_RE.replace_all(&text, "$1");
    let text = SENTENCE_SPACING_RE.replace_all(&text, "$1 ");
    text.trim().to_string()
}

/// Joins whitespace-separated tokens with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keeps at most `max_chars` characters, appending `marker` when anything was cut.
///
/// Counts `char`s, so the cut always lands on a UTF-8 boundary.
pub fn truncate_with_marker(text: &str, max_chars: usize, marker: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], marker),
        None => text.to_string(),
    }
}

/// Like [`truncate_with_marker`], but the marker counts toward `max_chars`.
pub fn truncate_within(text: &str, max_chars: usize, marker: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(marker.chars().count());
    truncate_with_marker(text, keep, marker)
}

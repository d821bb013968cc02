//! CSS selector and regex construction helpers.

use regex::Regex;
use scraper::Selector;

/// Parses a selector built at runtime (e.g. from a tag name).
///
/// A parse failure is logged and replaced by `*:not(*)`, which matches
/// nothing, so the calling extractor simply finds no elements.
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Invalid CSS selector '{}' in {}: {}. Matching nothing instead.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)")
            .unwrap_or_else(|e| panic!("fallback selector '*:not(*)' failed to parse: {e}"))
    })
}

/// Parses a selector literal used in a `LazyLock` static.
///
/// # Panics
///
/// Panics if the literal is invalid, which can only be a programming error.
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Compiles a regex literal used in a `LazyLock` static.
///
/// # Panics
///
/// Panics if the pattern is invalid, which can only be a programming error.
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

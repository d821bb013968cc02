//! Email and phone discovery in page text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::MAX_CONTACT_ENTRIES;
use crate::models::ContactInfo;
use crate::utils::compile_regex_unsafe;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", "EMAIL_RE")
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?:\+\d{1,3}[-.\s]?)?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}",
        "PHONE_RE",
    )
});

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// First `limit` distinct values, in first-seen order.
fn distinct_first_seen<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn plausible_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Scans `text` for email addresses and phone numbers.
///
/// Phone candidates need 7 to 15 digits, which drops years, prices and
/// similar short numbers.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let emails = distinct_first_seen(
        EMAIL_RE.find_iter(text).map(|m| m.as_str()),
        MAX_CONTACT_ENTRIES,
    );
    let phones = distinct_first_seen(
        PHONE_RE
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .filter(|candidate| plausible_phone(candidate)),
        MAX_CONTACT_ENTRIES,
    );
    ContactInfo { emails, phones }
}

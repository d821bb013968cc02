//! URL validation, normalization and resolution.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::selector::compile_regex_unsafe;
use crate::config::MAX_URL_LENGTH;
use crate::error_handling::ScrapeError;

static SCHEME_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"^[A-Za-z][A-Za-z0-9+.\-]*://", "SCHEME_PREFIX_RE"));

/// Validates and normalizes a page URL.
///
/// Adds an `https://` prefix when no scheme is given, then requires a
/// syntactically valid http/https URL no longer than `MAX_URL_LENGTH`.
pub fn validate_and_normalize_url(input: &str) -> Result<Url, ScrapeError> {
    let trimmed = input.trim();
    let invalid = |reason: String| ScrapeError::InvalidUrl {
        url: input.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("empty URL".to_string()));
    }

    // A `://` later in the string (say in a query parameter) is not a scheme.
    let normalized = if SCHEME_PREFIX_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    // Checked after prefixing, since the prefix can push a URL over the limit.
    if normalized.len() > MAX_URL_LENGTH {
        return Err(invalid(format!(
            "exceeds maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        )));
    }

    let parsed = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed)
}

/// Resolves `href` against the page URL, `None` when it cannot be joined.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}

/// Lower-cased host of a URL without a leading `www.`.
pub fn comparable_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| {
        let h = h.to_ascii_lowercase();
        h.strip_prefix("www.").map(str::to_string).unwrap_or(h)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_and_normalize_url_adds_https() {
        let url = validate_and_normalize_url("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_validate_and_normalize_url_preserves_http() {
        let url = validate_and_normalize_url("http://example.com/a?b=1").unwrap();
        assert_eq!(url.as_str(), "http://example.com/a?b=1");
    }

    #[test]
    fn test_validate_and_normalize_url_ignores_embedded_scheme() {
        let url = validate_and_normalize_url("example.com/login?next=https://example.com/home")
            .expect("valid once prefixed");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/login");
        assert_eq!(url.query(), Some("next=https://example.com/home"));
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_ftp() {
        let err = validate_and_normalize_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl { .. }));
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_garbage() {
        assert!(validate_and_normalize_url("").is_err());
        assert!(validate_and_normalize_url("http://").is_err());
        assert!(validate_and_normalize_url("exa mple.com").is_err());
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_too_long() {
        let long = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH));
        let err = validate_and_normalize_url(&long).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
    }

    #[test]
    fn test_resolve_url_relative() {
        let base = Url::parse("https://example.com/blog/post").unwrap();
        assert_eq!(
            resolve_url(&base, "../about").unwrap().as_str(),
            "https://example.com/about"
        );
        assert_eq!(
            resolve_url(&base, "//cdn.example.org/x.png").unwrap().as_str(),
            "https://cdn.example.org/x.png"
        );
    }

    #[test]
    fn test_comparable_host_strips_www() {
        let url = Url::parse("https://WWW.Example.com/").unwrap();
        assert_eq!(comparable_host(&url).as_deref(), Some("example.com"));
    }
}

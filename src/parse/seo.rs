//! On-page SEO signals.

use std::sync::LazyLock;

use scraper::Selector;

use crate::models::{HeadingRecord, HeadingStructure, Hreflang, ImageRecord, LinkRecord, LinkScope, PageLoadHints, SeoProfile};
use crate::parse::document::{ElementAttrs, ParsedDocument};
use crate::utils::parse_selector_unsafe;

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"meta[name="description"]"#, "META_DESCRIPTION_SELECTOR"));
static META_KEYWORDS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"meta[name="keywords"]"#, "META_KEYWORDS_SELECTOR"));
static META_ROBOTS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"meta[name="robots"]"#, "META_ROBOTS_SELECTOR"));
static CANONICAL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"link[rel~="canonical"]"#, "CANONICAL_SELECTOR"));
static HTML_LANG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("html[lang]", "HTML_LANG_SELECTOR"));
static HREFLANG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(r#"link[rel~="alternate"][hreflang]"#, "HREFLANG_SELECTOR")
});
static PRELOAD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"link[rel~="preload"]"#, "PRELOAD_SELECTOR"));
static PREFETCH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"link[rel~="prefetch"]"#, "PREFETCH_SELECTOR"));

/// Value of `attribute` on the first element matching `selector`, trimmed.
fn first_attr(document: &ParsedDocument, selector: &Selector, attribute: &str) -> String {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr(attribute))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Content of `<meta name="description">`, or `""`.
pub fn meta_description(document: &ParsedDocument) -> String {
    first_attr(document, &META_DESCRIPTION_SELECTOR, "content")
}

/// Builds the SEO profile.
///
/// Heading, link and image figures are derived from the already-extracted
/// records, so they agree with the per-record artifacts.
pub fn extract_seo_profile(
    document: &ParsedDocument,
    headings: &[HeadingRecord],
    links: &[LinkRecord],
    images: &[ImageRecord],
) -> SeoProfile {
    let hreflang = document
        .select(&HREFLANG_SELECTOR)
        .map(|link| {
            let attrs = ElementAttrs::of(link);
            Hreflang {
                hreflang: attrs.value_or_empty("hreflang"),
                href: attrs.value_or_empty("href"),
            }
        })
        .collect();

    let images_with_alt = images.iter().filter(|image| image.has_alt).count();

    SeoProfile {
        title_tag: document.title().unwrap_or_default(),
        meta_description: meta_description(document),
        meta_keywords: first_attr(document, &META_KEYWORDS_SELECTOR, "content"),
        canonical_url: first_attr(document, &CANONICAL_SELECTOR, "href"),
        robots: first_attr(document, &META_ROBOTS_SELECTOR, "content"),
        lang: first_attr(document, &HTML_LANG_SELECTOR, "lang"),
        hreflang,
        heading_structure: HeadingStructure::from_records(headings),
        internal_links: links.iter().filter(|l| l.scope == LinkScope::Internal).count(),
        external_links: links.iter().filter(|l| l.scope == LinkScope::External).count(),
        images_with_alt,
        images_without_alt: images.len() - images_with_alt,
        page_load_hints: PageLoadHints {
            preload: document.select(&PRELOAD_SELECTOR).count(),
            prefetch: document.select(&PREFETCH_SELECTOR).count(),
        },
    }
}

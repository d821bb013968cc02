//! Link and image records.

use std::sync::LazyLock;

use scraper::Selector;
use url::Url;

use crate::config::{MAX_LINK_TEXT_CHARS, TRUNCATION_MARKER};
use crate::models::{ImageRecord, LinkRecord, LinkScope};
use crate::parse::document::{element_text, ElementAttrs, ParsedDocument};
use crate::utils::{collapse_whitespace, comparable_host, parse_selector_unsafe, resolve_url, truncate_within};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a[href]", "ANCHOR_SELECTOR"));
static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("img", "IMG_SELECTOR"));

/// Scope of a resolved link relative to the page host.
///
/// Only http(s) targets are internal or external; `mailto:`, `tel:`,
/// `javascript:` and anything that failed to resolve are `Other`.
pub fn link_scope(page: &Url, target: Option<&Url>) -> LinkScope {
    let Some(target) = target else {
        return LinkScope::Other;
    };
    if !matches!(target.scheme(), "http" | "https") {
        return LinkScope::Other;
    }
    match (comparable_host(page), comparable_host(target)) {
        (Some(page_host), Some(target_host)) if page_host == target_host => LinkScope::Internal,
        (_, Some(_)) => LinkScope::External,
        _ => LinkScope::Other,
    }
}

/// The first `max_links` anchors that carry an `href`.
pub fn extract_links(document: &ParsedDocument, max_links: usize) -> Vec<LinkRecord> {
    let page = document.url();
    document
        .select(&ANCHOR_SELECTOR)
        .take(max_links)
        .enumerate()
        .map(|(index, anchor)| {
            let attrs = ElementAttrs::of(anchor);
            let href = attrs.href().unwrap_or_default().to_string();
            let resolved = resolve_url(page, &href);
            LinkRecord {
                text: truncate_within(
                    &collapse_whitespace(&element_text(anchor)),
                    MAX_LINK_TEXT_CHARS,
                    TRUNCATION_MARKER,
                ),
                scope: link_scope(page, resolved.as_ref()),
                resolved_url: resolved.map(String::from),
                href,
                title: attrs.value_or_empty("title"),
                target: attrs.value_or_empty("target"),
                rel: attrs.value_or_empty("rel"),
                class: attrs.class_string(),
                position: index + 1,
            }
        })
        .collect()
}

/// Images among the first `max_images` `<img>` elements that have a source.
///
/// The source is `src`, falling back to `data-src` for lazy loaders.
/// `position` is the image's 1-based index among all `<img>` elements, so
/// skipped images leave gaps.
pub fn extract_images(document: &ParsedDocument, max_images: usize) -> Vec<ImageRecord> {
    let page = document.url();
    document
        .select(&IMG_SELECTOR)
        .take(max_images)
        .enumerate()
        .filter_map(|(index, img)| {
            let attrs = ElementAttrs::of(img);
            let src = attrs
                .src()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| attrs.get("data-src").filter(|s| !s.trim().is_empty()))?
                .to_string();
            let alt = attrs.value_or_empty("alt");
            Some(ImageRecord {
                resolved_src: resolve_url(page, &src).map(String::from),
                has_alt: !alt.trim().is_empty(),
                alt,
                src,
                title: attrs.value_or_empty("title"),
                width: attrs.value_or_empty("width"),
                height: attrs.value_or_empty("height"),
                loading: attrs.value_or_empty("loading"),
                class: attrs.class_string(),
                position: index + 1,
            })
        })
        .collect()
}

//! Parsed document and typed attribute access.
//!
//! `scraper::Html` keeps every node in one `ego_tree` arena; parents are
//! reached through `NodeId` handles into that arena, so no extractor ever
//! owns or mutates a node.

use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::error_handling::ScrapeError;
use crate::utils::{collapse_whitespace, parse_selector_unsafe};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("title", "TITLE_SELECTOR"));

/// Elements whose text is never shown to a reader.
const NON_VISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A page parsed once and shared read-only by every extractor.
pub struct ParsedDocument {
    html: Html,
    url: Url,
}

impl std::fmt::Debug for ParsedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedDocument")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl ParsedDocument {
    /// Parses `body` as an HTML document located at `url`.
    ///
    /// html5ever recovers from any markup, so the only failure is a body
    /// with no content at all.
    pub fn parse(body: &str, url: Url) -> Result<Self, ScrapeError> {
        if body.trim().is_empty() {
            return Err(ScrapeError::Parse(format!("empty response body from {url}")));
        }
        let html = Html::parse_document(body);
        if !html.errors.is_empty() {
            log::debug!("{} recoverable HTML parse errors in {}", html.errors.len(), url);
        }
        Ok(ParsedDocument { html, url })
    }

    /// Page URL (after redirects), the base for resolving relative links.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Trimmed text of the first `<title>`, if there is one.
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| collapse_whitespace(&t.text().collect::<String>()))
    }

    /// Text a reader would see, whitespace-collapsed.
    ///
    /// Text inside `script`, `style`, `noscript` and `template` is skipped.
    /// Text nodes are joined with spaces so adjacent block elements do not run
    /// their words together.
    pub fn visible_text(&self) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        for node in self.html.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| NON_VISIBLE_TAGS.contains(&e.name()))
            });
            if !hidden {
                pieces.push(text);
            }
        }
        collapse_whitespace(&pieces.join(" "))
    }
}

/// Typed view over an element's attributes.
///
/// Known attributes get accessors; everything else stays reachable through
/// [`get`](Self::get) and [`data_attributes`](Self::data_attributes).
#[derive(Clone, Copy)]
pub struct ElementAttrs<'a> {
    element: &'a Element,
}

impl<'a> ElementAttrs<'a> {
    pub fn of(element: ElementRef<'a>) -> Self {
        ElementAttrs {
            element: element.value(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.element.attr(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.element.attr(name).is_some()
    }

    /// Attribute value, or `""` when missing.
    pub fn value_or_empty(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    pub fn id(&self) -> &'a str {
        self.element.id().unwrap_or_default()
    }

    /// Class names in document order.
    pub fn class_list(&self) -> Vec<&'a str> {
        self.get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Class names joined with single spaces.
    pub fn class_string(&self) -> String {
        self.class_list().join(" ")
    }

    pub fn href(&self) -> Option<&'a str> {
        self.get("href")
    }

    pub fn src(&self) -> Option<&'a str> {
        self.get("src")
    }

    pub fn title(&self) -> Option<&'a str> {
        self.get("title")
    }

    /// Every `data-*` attribute, names kept as written.
    pub fn data_attributes(&self) -> Vec<(&'a str, &'a str)> {
        self.element
            .attrs()
            .filter(|(name, _)| name.starts_with("data-"))
            .collect()
    }
}

/// Raw text of an element and all its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Tag name of the parent element, `""` at the root.
pub fn parent_tag(element: ElementRef<'_>) -> String {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .map(|p| p.value().name().to_string())
        .unwrap_or_default()
}

/// Whether any descendant of `element` matches `selector`.
pub fn has_descendant(element: ElementRef<'_>, selector: &Selector) -> bool {
    element.select(selector).next().is_some()
}

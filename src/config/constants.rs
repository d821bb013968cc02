//! Configuration constants.
//!
//! This module defines the defaults and fixed limits used throughout the pipeline,
//! including timeouts, extraction caps, and text truncation lengths.

use std::time::Duration;

// Defaults for `ScrapeConfig`
/// Per-request timeout in seconds.
/// Applies to each identity-profile attempt separately, so a fully exhausted
/// fetch can take roughly `3 * DEFAULT_REQUEST_TIMEOUT_SECS` plus backoff.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Number of identity profiles tried before giving up.
pub const DEFAULT_MAX_IDENTITY_PROFILE_ATTEMPTS: usize = 3;
/// Maximum number of `<a href>` elements turned into link records.
pub const DEFAULT_MAX_LINKS: usize = 500;
/// Maximum number of `<img>` elements turned into image records.
pub const DEFAULT_MAX_IMAGES: usize = 200;
/// Maximum number of `<table>` elements extracted.
pub const DEFAULT_MAX_TABLES: usize = 20;
/// Maximum characters kept in `ScrapeResult::text_content`.
pub const DEFAULT_TEXT_CONTENT_MAX_CHARS: usize = 5000;

// Retry policy timing
/// Delay before the very first request, to reduce rate-limit triggers.
pub const INITIAL_REQUEST_DELAY: Duration = Duration::from_secs(1);
/// Backoff before the second identity profile.
pub const SECOND_PROFILE_BACKOFF: Duration = Duration::from_secs(2);
/// Backoff before the third identity profile.
pub const THIRD_PROFILE_BACKOFF: Duration = Duration::from_secs(3);
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Maximum number of redirect hops reqwest follows per attempt
pub const MAX_REDIRECT_HOPS: usize = 10;

// Fetch validation
/// Media types accepted as HTML (substring match on `Content-Type`).
pub const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml"];
/// Title fragments that identify a block/error page served with status 200.
pub const ERROR_PAGE_TITLE_MARKERS: &[&str] =
    &["403", "forbidden", "access denied", "blocked", "error"];

// Text truncation
/// Suffix appended to any text field that was truncated.
pub const TRUNCATION_MARKER: &str = "...";
/// Maximum characters in a link's anchor text, marker included.
pub const MAX_LINK_TEXT_CHARS: usize = 200;
/// Maximum characters in a table cell, marker included.
pub const MAX_TABLE_CELL_CHARS: usize = 100;
/// Maximum characters in a data-attribute element preview.
pub const MAX_DATA_ATTRIBUTE_TEXT_CHARS: usize = 100;
/// Minimum normalized text length for a content element.
pub const MIN_CONTENT_ELEMENT_CHARS: usize = 3;
/// Minimum raw text length for a content block.
pub const MIN_CONTENT_BLOCK_CHARS: usize = 10;

// Structured-data caps
/// Maximum distinct emails and phones each.
pub const MAX_CONTACT_ENTRIES: usize = 10;
/// Maximum media elements per kind (video, audio, iframe).
pub const MAX_MEDIA_PER_KIND: usize = 10;
/// Maximum lists captured in the content structure.
pub const MAX_LISTS: usize = 10;
/// Maximum code blocks captured in the content structure.
pub const MAX_CODE_BLOCKS: usize = 10;
/// Maximum elements with `data-*` attributes captured.
pub const MAX_DATA_ATTRIBUTE_ELEMENTS: usize = 20;

// Text statistics
/// Reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 250;
/// Minimum words before a readability score is computed.
pub const MIN_READABILITY_WORDS: usize = 10;

/// Maximum URL length accepted (2048 characters), matching common browser limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum characters in a heading's text, marker included.
pub const MAX_HEADING_TEXT_CHARS: usize = 500;

/// Characters of block text kept in `ContentBlock::text_preview`.
pub const BLOCK_PREVIEW_CHARS: usize = 200;

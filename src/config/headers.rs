//! HTTP header name constants.
//!
//! This module defines the response headers that the pipeline keeps for the
//! performance artifact.

/// Content-Type header
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Server header (identifies server software)
pub const HEADER_SERVER: &str = "Server";
/// Cache-Control header
pub const HEADER_CACHE_CONTROL: &str = "Cache-Control";
/// Expires header
pub const HEADER_EXPIRES: &str = "Expires";
/// Last-Modified header
pub const HEADER_LAST_MODIFIED: &str = "Last-Modified";
/// ETag header
pub const HEADER_ETAG: &str = "ETag";

/// Response headers captured into `ScrapeResult::response_headers`.
///
/// `Content-Encoding` is left out: reqwest decodes compressed bodies and
/// drops that header before the response reaches us.
pub const CAPTURED_RESPONSE_HEADERS: &[&str] = &[
    HEADER_CONTENT_TYPE,
    HEADER_SERVER,
    HEADER_CACHE_CONTROL,
    HEADER_EXPIRES,
    HEADER_LAST_MODIFIED,
    HEADER_ETAG,
];

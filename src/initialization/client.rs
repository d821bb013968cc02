//! HTTP client initialization.
//!
//! One client is built per identity profile, so the profile's User-Agent and
//! default headers apply to every request and redirect hop it makes.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use crate::fetch::IdentityProfile;

/// Builds a `reqwest::Client` for one identity profile.
///
/// The client follows up to `MAX_REDIRECT_HOPS` redirects, enforces
/// `timeout` for the whole request, and transparently decodes gzip, brotli
/// and deflate bodies (reqwest sets `Accept-Encoding` itself).
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend or a
/// header value is rejected by reqwest.
pub fn init_client(
    profile: &IdentityProfile,
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(timeout))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .user_agent(profile.user_agent.clone())
        .default_headers(profile.header_map())
        .build()?;
    Ok(client)
}

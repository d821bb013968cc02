//! A single request attempt under one identity profile.

use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::header::HeaderMap;
use url::Url;

use crate::config::CAPTURED_RESPONSE_HEADERS;
use crate::fetch::{FetchResult, IdentityProfile};

/// What one attempt produced.
pub(crate) enum AttemptOutcome {
    /// Status 200 with the body fully read
    Success(FetchResult),
    /// The server answered with another status
    Status(u16),
    /// No usable response (DNS, connect, timeout, body read)
    Transport(reqwest::Error),
}

/// Keeps the headers listed in `CAPTURED_RESPONSE_HEADERS`, keyed by lower-case name.
pub(crate) fn capture_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    CAPTURED_RESPONSE_HEADERS
        .iter()
        .filter_map(|&name| {
            headers.get(name).map(|value| {
                (
                    name.to_ascii_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
        })
        .collect()
}

/// Sends one GET and, on 200, reads the whole body.
pub(crate) async fn attempt(
    client: &reqwest::Client,
    url: &Url,
    profile: &IdentityProfile,
) -> AttemptOutcome {
    let start = Instant::now();
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return AttemptOutcome::Transport(e),
    };

    let status = response.status().as_u16();
    if status != 200 {
        return AttemptOutcome::Status(status);
    }

    let final_url = response.url().clone();
    let headers = capture_headers(response.headers());
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match response.bytes().await {
        Ok(body) => AttemptOutcome::Success(FetchResult {
            final_url,
            status,
            headers,
            content_type,
            body: body.to_vec(),
            profile: profile.name.clone(),
            elapsed: start.elapsed(),
        }),
        Err(e) => AttemptOutcome::Transport(e),
    }
}

//! Error categorization.
//!
//! Turns transport failures into the short reasons recorded per fetch attempt.

use crate::utils::truncate_message;

/// Coarse transport failure classes, used for attempt reasons and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransportFailure {
    Timeout,
    Connect,
    Redirect,
    Body,
    Decode,
    Request,
    Other,
}

impl TransportFailure {
    fn as_str(&self) -> &'static str {
        match self {
            TransportFailure::Timeout => "timeout",
            TransportFailure::Connect => "connect error",
            TransportFailure::Redirect => "redirect error",
            TransportFailure::Body => "body error",
            TransportFailure::Decode => "decode error",
            TransportFailure::Request => "request error",
            TransportFailure::Other => "transport error",
        }
    }
}

/// Categorizes a `reqwest::Error` raised before a status line was available.
fn categorize_reqwest_error(error: &reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout
    } else if error.is_connect() {
        TransportFailure::Connect
    } else if error.is_redirect() {
        TransportFailure::Redirect
    } else if error.is_body() {
        TransportFailure::Body
    } else if error.is_decode() {
        TransportFailure::Decode
    } else if error.is_request() {
        TransportFailure::Request
    } else {
        TransportFailure::Other
    }
}

/// One-line attempt reason for a transport error, e.g. `timeout: operation timed out`.
pub fn transport_reason(error: &reqwest::Error) -> String {
    let category = categorize_reqwest_error(error);
    format!(
        "{}: {}",
        category.as_str(),
        truncate_message(&error.to_string(), 200)
    )
}

//! Fetch result type.

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

/// A successful, validated HTTP response.
///
/// Produced once per scrape and dropped after parsing.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL after redirects
    pub final_url: Url,
    pub status: u16,
    /// Captured response headers, keyed by lower-case name
    pub headers: BTreeMap<String, String>,
    pub content_type: String,
    /// Body as received (after transparent transfer decoding)
    pub body: Vec<u8>,
    /// Identity profile that got through
    pub profile: String,
    /// Time from sending the successful request to reading the full body
    pub elapsed: Duration,
}

impl FetchResult {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

//! Identity profiles and the retry policy that orders them.
//!
//! A profile is the header set a request presents: User-Agent plus the
//! companion headers a real client of that kind would send. When a site
//! answers 403 or the connection fails, the fetcher moves to the next
//! profile after that profile's backoff.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::{INITIAL_REQUEST_DELAY, SECOND_PROFILE_BACKOFF, THIRD_PROFILE_BACKOFF};

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
const MINIMAL_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SAFARI_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15";
const BOT_USER_AGENT: &str = "Mozilla/5.0 (compatible; PageProfiler/1.0; +https://example.com/bot)";

/// A named client identity.
///
/// `Accept-Encoding` is deliberately absent: reqwest advertises the encodings
/// it can decode and only decodes when it set the header itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub name: String,
    pub user_agent: String,
    /// Extra request headers, in sending order
    pub headers: Vec<(String, String)>,
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl IdentityProfile {
    /// Current desktop Chrome on Windows with navigation and client-hint headers.
    pub fn chrome_desktop() -> Self {
        IdentityProfile {
            name: "chrome-desktop".to_string(),
            user_agent: CHROME_USER_AGENT.to_string(),
            headers: owned(&[
                ("accept", BROWSER_ACCEPT),
                ("accept-language", "en-US,en;q=0.9"),
                ("dnt", "1"),
                ("upgrade-insecure-requests", "1"),
                ("sec-fetch-dest", "document"),
                ("sec-fetch-mode", "navigate"),
                ("sec-fetch-site", "none"),
                ("sec-fetch-user", "?1"),
                ("cache-control", "max-age=0"),
                (
                    "sec-ch-ua",
                    "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
                ),
                ("sec-ch-ua-mobile", "?0"),
                ("sec-ch-ua-platform", "\"Windows\""),
            ]),
        }
    }

    /// Safari on macOS. Same navigation headers, no Chromium client hints.
    pub fn safari_mac() -> Self {
        IdentityProfile {
            name: "safari-mac".to_string(),
            user_agent: SAFARI_USER_AGENT.to_string(),
            headers: owned(&[
                ("accept", BROWSER_ACCEPT),
                ("accept-language", "en-US,en;q=0.9"),
                ("upgrade-insecure-requests", "1"),
                ("sec-fetch-dest", "document"),
                ("sec-fetch-mode", "navigate"),
                ("sec-fetch-site", "none"),
            ]),
        }
    }

    /// Openly declared crawler with only an `Accept` header.
    pub fn minimal_bot() -> Self {
        IdentityProfile {
            name: "minimal-bot".to_string(),
            user_agent: BOT_USER_AGENT.to_string(),
            headers: owned(&[("accept", MINIMAL_ACCEPT)]),
        }
    }

    /// Headers as a `HeaderMap`; invalid names or values are logged and skipped.
    pub fn header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => log::warn!(
                    "Skipping invalid header `{}` in identity profile {}",
                    name,
                    self.name
                ),
            }
        }
        map
    }
}

/// Ordered identity profiles with the wait before each one.
///
/// The first profile's backoff is ignored; `initial_delay` applies before the
/// first request instead.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub profiles: Vec<(IdentityProfile, Duration)>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            initial_delay: INITIAL_REQUEST_DELAY,
            profiles: vec![
                (IdentityProfile::chrome_desktop(), Duration::ZERO),
                (IdentityProfile::safari_mac(), SECOND_PROFILE_BACKOFF),
                (IdentityProfile::minimal_bot(), THIRD_PROFILE_BACKOFF),
            ],
        }
    }
}

impl RetryPolicy {
    /// The default profiles with every delay set to zero.
    pub fn immediate() -> Self {
        let mut policy = Self::default();
        policy.initial_delay = Duration::ZERO;
        for (_, backoff) in &mut policy.profiles {
            *backoff = Duration::ZERO;
        }
        policy
    }

    /// The profiles to try, limited to `max_attempts`.
    pub fn attempts(&self, max_attempts: usize) -> impl Iterator<Item = &(IdentityProfile, Duration)> {
        self.profiles.iter().take(max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_order_and_delays() {
        let policy = RetryPolicy::default();
        let names: Vec<_> = policy.profiles.iter().map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(names, ["chrome-desktop", "safari-mac", "minimal-bot"]);
        assert_eq!(policy.initial_delay, Duration::from_secs(1));
        assert_eq!(policy.profiles[1].1, Duration::from_secs(2));
        assert_eq!(policy.profiles[2].1, Duration::from_secs(3));
    }

    #[test]
    fn test_immediate_policy_has_no_delays() {
        let policy = RetryPolicy::immediate();
        assert_eq!(policy.initial_delay, Duration::ZERO);
        assert!(policy.profiles.iter().all(|(_, d)| d.is_zero()));
        assert_eq!(policy.profiles.len(), 3);
    }

    #[test]
    fn test_attempts_respects_limit() {
        let policy = RetryPolicy::immediate();
        assert_eq!(policy.attempts(2).count(), 2);
        assert_eq!(policy.attempts(10).count(), 3);
    }

    #[test]
    fn test_header_maps_are_valid() {
        for (profile, _) in RetryPolicy::default().profiles {
            let map = profile.header_map();
            assert_eq!(map.len(), profile.headers.len(), "{}", profile.name);
            assert!(!map.contains_key(reqwest::header::ACCEPT_ENCODING));
            assert!(map.contains_key(reqwest::header::ACCEPT));
        }
    }

    #[test]
    fn test_invalid_header_is_skipped() {
        let profile = IdentityProfile {
            name: "broken".to_string(),
            user_agent: "x".to_string(),
            headers: owned(&[("bad header", "v"), ("accept", "text/html")]),
        };
        assert_eq!(profile.header_map().len(), 1);
    }
}

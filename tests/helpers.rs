// Shared test helpers for mock-server scrapes.
//
// Included by the integration test files with `mod helpers;`.

use std::sync::Mutex;

use httptest::responders::{status_code, Responder};
use page_profiler::{ProgressSink, RetryPolicy, ScrapeConfig};

/// Default configuration with every retry delay set to zero.
#[allow(dead_code)] // Used by other test files
pub fn fast_config() -> ScrapeConfig {
    ScrapeConfig {
        request_timeout_seconds: 5,
        retry_policy: RetryPolicy::immediate(),
        ..Default::default()
    }
}

/// A 200 response carrying `body` as UTF-8 HTML.
#[allow(dead_code)] // Used by other test files
pub fn html_response(body: &str) -> impl Responder {
    status_code(200)
        .insert_header("Content-Type", "text/html; charset=utf-8")
        .body(body.to_string())
}

/// Progress sink that records every checkpoint.
#[derive(Default)]
#[allow(dead_code)] // Used by other test files
pub struct RecordingProgress {
    pub calls: Mutex<Vec<(u8, String)>>,
}

impl ProgressSink for RecordingProgress {
    fn on_progress(&self, percent: u8, message: &str) {
        self.calls
            .lock()
            .expect("progress lock poisoned")
            .push((percent, message.to_string()));
    }
}

#[allow(dead_code)] // Used by other test files
impl RecordingProgress {
    pub fn percents(&self) -> Vec<u8> {
        self.calls
            .lock()
            .expect("progress lock poisoned")
            .iter()
            .map(|(p, _)| *p)
            .collect()
    }
}

/// A page with `words` filler words inside one paragraph.
#[allow(dead_code)] // Used by other test files
pub fn filler(words: usize) -> String {
    vec!["lorem"; words].join(" ")
}

//! Integration tests for the fetcher's identity-profile fallback.
//!
//! Every test runs against an `httptest` mock server with a zero-delay retry
//! policy, so nothing touches the network.

mod helpers;

use std::time::Duration;

use httptest::{all_of, matchers::*, responders::*, Expectation, Server};
use page_profiler::{run_scrape, ErrorKind, NoopProgress, RetryPolicy, ScrapeConfig, ScrapeError};
use tokio_util::sync::CancellationToken;

use helpers::{fast_config, html_response, RecordingProgress};

const SIMPLE_PAGE: &str = "<html><head><title>Catalog</title></head>\
    <body><h1>Catalog</h1><p>Three widgets are available this week.</p></body></html>";

fn page_url(server: &Server) -> String {
    format!("http://{}/", server.addr())
}

#[tokio::test]
async fn test_403_escalates_to_next_profile() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/"),
            request::headers(contains(("user-agent", matches("Chrome/120")))),
        ])
        .times(1)
        .respond_with(status_code(403)),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/"),
            request::headers(contains(("user-agent", matches("Version/16"))))
        ])
        .times(1)
        .respond_with(html_response(SIMPLE_PAGE)),
    );

    let progress = RecordingProgress::default();
    let output = run_scrape(
        &page_url(&server),
        &fast_config(),
        &progress,
        &CancellationToken::new(),
    )
    .await
    .expect("second profile should get through");

    assert_eq!(output.result.title, "Catalog");
    assert_eq!(output.result.response_status, 200);
    assert_eq!(progress.percents().last(), Some(&100));
}

#[tokio::test]
async fn test_three_403s_fail_with_every_attempt_named() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(3)
            .respond_with(status_code(403)),
    );

    let err = run_scrape(
        &page_url(&server),
        &fast_config(),
        &NoopProgress,
        &CancellationToken::new(),
    )
    .await
    .expect_err("all profiles are blocked");

    assert_eq!(err.kind(), ErrorKind::FetchHttp);
    let profiles: Vec<&str> = err.attempts().iter().map(|a| a.profile.as_str()).collect();
    assert_eq!(profiles, ["chrome-desktop", "safari-mac", "minimal-bot"]);
    assert!(err.attempts().iter().all(|a| a.reason == "HTTP 403"));
    let message = err.to_string();
    assert!(message.contains("chrome-desktop"));
    assert!(message.contains("minimal-bot"));
}

#[tokio::test]
async fn test_attempt_limit_caps_profiles_tried() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(1)
            .respond_with(status_code(403)),
    );
    let config = ScrapeConfig {
        max_identity_profile_attempts: 1,
        ..fast_config()
    };

    let err = run_scrape(&page_url(&server), &config, &NoopProgress, &CancellationToken::new())
        .await
        .expect_err("single profile is blocked");

    assert!(matches!(err, ScrapeError::FetchHttp { status: 403, .. }));
    assert_eq!(err.attempts().len(), 1);
}

#[tokio::test]
async fn test_404_fails_without_escalation() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .times(1)
            .respond_with(status_code(404)),
    );

    let url = format!("http://{}/missing", server.addr());
    let err = run_scrape(&url, &fast_config(), &NoopProgress, &CancellationToken::new())
        .await
        .expect_err("404 is final");

    assert!(matches!(err, ScrapeError::FetchHttp { status: 404, .. }));
    assert_eq!(err.attempts().len(), 1);
}

#[tokio::test]
async fn test_json_content_type_is_rejected() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(1)
            .respond_with(
                status_code(200)
                    .insert_header("Content-Type", "application/json")
                    .body(r#"{"ok":true}"#),
            ),
    );

    let err = run_scrape(
        &page_url(&server),
        &fast_config(),
        &NoopProgress,
        &CancellationToken::new(),
    )
    .await
    .expect_err("JSON is not a page");

    assert_eq!(err.kind(), ErrorKind::InvalidContentType);
    assert!(err.to_string().contains("application/json"));
}

#[tokio::test]
async fn test_block_page_title_is_detected() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(html_response(
                "<html><head><title>Access Denied</title></head><body>Nope</body></html>",
            )),
    );

    let err = run_scrape(
        &page_url(&server),
        &fast_config(),
        &NoopProgress,
        &CancellationToken::new(),
    )
    .await
    .expect_err("block page");

    match err {
        ScrapeError::ErrorPageDetected { title, .. } => assert_eq!(title, "Access Denied"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_empty_body_is_a_parse_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(html_response("")),
    );

    let err = run_scrape(
        &page_url(&server),
        &fast_config(),
        &NoopProgress,
        &CancellationToken::new(),
    )
    .await
    .expect_err("nothing to parse");

    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_unreachable_host_reports_transport_failures() {
    // Bind then drop a listener so the port is very likely closed.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .expect("bind ephemeral port")
        .port();
    let url = format!("http://127.0.0.1:{port}/");

    let err = run_scrape(&url, &fast_config(), &NoopProgress, &CancellationToken::new())
        .await
        .expect_err("nothing is listening");

    assert_eq!(err.kind(), ErrorKind::FetchTransport);
    assert_eq!(err.attempts().len(), 3);
}

#[tokio::test]
async fn test_cancelled_before_start_sends_no_request() {
    // No expectations: any request would fail the server's verification.
    let server = Server::run();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = run_scrape(&page_url(&server), &fast_config(), &NoopProgress, &cancel)
        .await
        .expect_err("cancelled");

    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_cancel_interrupts_backoff() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(1)
            .respond_with(status_code(403)),
    );

    let mut policy = RetryPolicy::immediate();
    policy.profiles[1].1 = Duration::from_secs(30);
    let config = ScrapeConfig {
        retry_policy: policy,
        ..fast_config()
    };

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        run_scrape(&page_url(&server), &config, &NoopProgress, &cancel),
    )
    .await
    .expect("cancellation should cut the 30s backoff short");

    assert_eq!(outcome.expect_err("cancelled").kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_invalid_url_is_rejected_before_fetch() {
    let err = run_scrape(
        "ftp://example.com/file",
        &ScrapeConfig::default(),
        &NoopProgress,
        &CancellationToken::new(),
    )
    .await
    .expect_err("unsupported scheme");

    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
}

//! End-to-end tests of `run_scrape` against a mock server.
//!
//! These exercise the whole pipeline (fetch, parse, extract, score,
//! serialize) and then read the CSV artifacts back.

mod helpers;

use httptest::{matchers::*, Expectation, Server};
use page_profiler::{run_scrape, write_artifacts, NoopProgress, ScrapeOutput};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use helpers::{fast_config, filler, html_response, RecordingProgress};

async fn scrape_page(body: &str) -> ScrapeOutput {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/page"))
            .respond_with(html_response(body)),
    );
    let url = format!("http://{}/page", server.addr());
    run_scrape(&url, &fast_config(), &NoopProgress, &CancellationToken::new())
        .await
        .expect("scrape should succeed")
}

fn read_csv(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .expect("header row")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("valid record").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

fn column<'a>(headers: &[String], row: &'a [String], name: &str) -> &'a str {
    let index = headers
        .iter()
        .position(|h| h == name)
        .unwrap_or_else(|| panic!("no column {name}"));
    &row[index]
}

#[tokio::test]
async fn test_short_page_scores_43() {
    let body = format!(
        "<html><head><title>Home</title></head><body>\
         <h1>Welcome</h1><h2>First</h2><h2>Second</h2>\
         <p>{}</p></body></html>",
        filler(50)
    );
    let output = scrape_page(&body).await;
    let result = &output.result;

    assert_eq!(result.title, "Home");
    assert!((50..150).contains(&result.word_count));
    assert_eq!(result.seo.heading_structure.count(1), 1);
    assert_eq!(result.seo.heading_structure.count(2), 2);
    assert_eq!(result.seo.internal_links, 0);
    assert_eq!(result.seo_score, 43);

    let (headers, rows) = read_csv(&output.artifacts["seo_analysis"]);
    assert_eq!(column(&headers, &rows[0], "SEO_Score"), "43");
}

#[tokio::test]
async fn test_full_page_profile() {
    let body = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Acme Widgets - Durable widgets for every workshop</title>
  <meta name="description" content="Acme builds durable widgets.">
  <meta property="og:title" content="Acme Widgets">
  <meta name="twitter:card" content="summary">
  <link rel="canonical" href="/page">
  <script type="application/ld+json">{"@type": "Organization", "name": "Acme"}</script>
  <script type="application/ld+json">{not json</script>
</head>
<body>
  <nav class="nav"><a href="/">Home</a><a href="/about">About</a></nav>
  <main id="content">
    <h1>Acme Widgets</h1>
    <h2>Why choose us?</h2>
    <p>Our widgets last for decades. Write to info@acme.example or call 555-123-4567.</p>
    <img src="/logo.png" alt="Acme logo" width="100">
    <img src="/banner.png">
    <a href="https://partner.example.org/">Partner</a>
    <table>
      <tr><th>Model</th><th>Price</th></tr>
      <tr><td>W-1</td><td>10</td></tr>
      <tr><td>W-2</td><td>12</td></tr>
    </table>
    <ol><li>Order</li><li>Install</li></ol>
    <form action="/search" method="get"><input type="text" name="q"><input type="submit"></form>
  </main>
</body>
</html>"#;
    let output = scrape_page(body).await;
    let result = &output.result;

    assert_eq!(result.description, "Acme builds durable widgets.");
    assert_eq!(result.headings.len(), 2);
    assert_eq!(result.links.len(), 3);
    assert_eq!(result.seo.internal_links, 2);
    assert_eq!(result.seo.external_links, 1);
    assert_eq!(result.seo.images_with_alt, 1);
    assert_eq!(result.seo.images_without_alt, 1);
    assert_eq!(result.seo.lang, "en");
    assert!(!result.seo.canonical_url.is_empty());
    assert_eq!(result.structured_data.json_ld.len(), 1);
    assert_eq!(result.structured_data.contact_info.emails, ["info@acme.example"]);
    assert_eq!(result.structured_data.contact_info.phones.len(), 1);
    assert_eq!(result.structured_data.social_media["og:title"], "Acme Widgets");
    assert_eq!(result.structured_data.forms.len(), 1);
    assert_eq!(result.content.lists.len(), 1);
    assert!(result
        .content_elements
        .iter()
        .all(|e| (1..=10).contains(&e.importance_score)));
    assert!(!result.diagnostics.is_empty(), "malformed JSON-LD is reported");

    for name in [
        "main_summary",
        "headings",
        "links",
        "images",
        "seo_analysis",
        "meta_tags",
        "social_media",
        "contact_info",
        "forms_summary",
        "lists_summary",
        "table_1",
        "full_text_content",
        "performance_metrics",
        "content_elements",
        "content_blocks",
    ] {
        assert!(output.artifacts.contains_key(name), "missing artifact {name}");
    }
}

#[tokio::test]
async fn test_image_without_alt_is_reported() {
    let output = scrape_page(
        r#"<html><head><title>Gallery of things</title></head>
        <body><p>Pictures of the week.</p><img src="/a.png"></body></html>"#,
    )
    .await;

    assert_eq!(output.result.seo.images_without_alt, 1);
    let (headers, rows) = read_csv(&output.artifacts["images"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(column(&headers, &rows[0], "Has_Alt"), "False");
    assert_eq!(column(&headers, &rows[0], "Alt_Length"), "0");
}

#[tokio::test]
async fn test_table_artifact_round_trips() {
    let output = scrape_page(
        r#"<html><head><title>Price list for widgets</title></head><body>
        <table>
          <tr><th>Item</th><th>Cost, USD</th><th>Stock</th></tr>
          <tr><td>Bolt</td><td>0.10</td><td>500</td></tr>
          <tr><td>Nut</td><td>0.05</td><td>800</td></tr>
        </table></body></html>"#,
    )
    .await;

    let table = &output.result.tables[0];
    let (headers, rows) = read_csv(&output.artifacts["table_1"]);
    assert_eq!(headers, table.headers);
    assert_eq!(rows.len(), table.row_count());
    assert_eq!(rows, table.rows);
}

#[tokio::test]
async fn test_performance_metrics_columns() {
    let output = scrape_page(
        "<html><head><title>Metrics page title</title></head><body><p>Some text.</p></body></html>",
    )
    .await;

    let (headers, rows) = read_csv(&output.artifacts["performance_metrics"]);
    assert_eq!(
        headers,
        [
            "URL",
            "Final_URL",
            "Response_Status",
            "Page_Size_Bytes",
            "Page_Size_KB",
            "Load_Time_Seconds",
            "Content_Type",
            "Server",
            "Is_Redirected",
            "Has_Cache_Headers",
            "Scraped_At",
        ]
    );
    assert_eq!(column(&headers, &rows[0], "Response_Status"), "200");
    assert_eq!(column(&headers, &rows[0], "Is_Redirected"), "False");
}

#[tokio::test]
async fn test_progress_checkpoints_in_order() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(html_response(
            "<html><head><title>Hello page</title></head><body><p>Hello world.</p></body></html>",
        )),
    );
    let progress = RecordingProgress::default();
    run_scrape(
        &format!("http://{}/", server.addr()),
        &fast_config(),
        &progress,
        &CancellationToken::new(),
    )
    .await
    .expect("scrape should succeed");

    assert_eq!(progress.percents(), vec![10, 30, 50, 70, 90, 100]);
    let calls = progress.calls.lock().expect("progress lock poisoned");
    assert!(calls
        .last()
        .is_some_and(|(_, message)| message.starts_with("Done in") && message.ends_with('s')));
}

#[tokio::test]
async fn test_write_artifacts_to_directory() {
    let output = scrape_page(
        "<html><head><title>Small page title</title></head><body><p>Short body text.</p></body></html>",
    )
    .await;
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let written = write_artifacts(temp_dir.path(), &output.artifacts).expect("write artifacts");

    assert_eq!(written.len(), output.artifacts.len());
    for (name, csv) in &output.artifacts {
        let path = temp_dir.path().join(format!("{name}.csv"));
        assert_eq!(&std::fs::read_to_string(&path).expect("read back"), csv);
    }
}

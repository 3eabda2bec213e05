// End-to-end tests for crawl orchestration

use sitewarden_core::audit::{IssueCategory, Severity};
use sitewarden_core::crawl::{crawl_website, CrawlSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings() -> CrawlSettings {
    CrawlSettings {
        delay_ms: 0,
        ..CrawlSettings::default()
    }
}

async fn mount_html(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(html.to_string()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_website_builds_full_report() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        &format!(
            r#"<html><head><title>Shop</title></head><body>
            <h1>Home</h1><h2>Deals</h2>
            <a href="{base}/a">a</a><a href="{base}/b">b</a>
            </body></html>"#
        ),
    )
    .await;
    // Two pages sharing a title, both without a meta description.
    for route in ["/a", "/b"] {
        mount_html(
            &server,
            route,
            "<html><head><title>Product</title></head><body><h1>P</h1><h2>Specs</h2></body></html>",
        )
        .await;
    }

    let report = crawl_website(&base, settings(), None).await.unwrap();

    assert_eq!(report.summary.total_pages, 3);
    assert_eq!(report.pages.len(), 3);
    assert!(report.pages.len() <= report.settings.max_pages);
    assert!(report.pages.iter().all(|p| p.depth <= report.settings.max_depth));
    assert!(!report.crawl_id.is_empty());
    assert_eq!(report.settings.delay_ms, 0);

    let duplicate_titles: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.issue == "Duplicate title")
        .collect();
    assert_eq!(duplicate_titles.len(), 1);
    assert!(duplicate_titles[0].page.contains("/a"));
    assert!(duplicate_titles[0].page.contains("/b"));

    assert_eq!(report.summary.duplicate_titles.len(), 1);
    assert_eq!(report.summary.pages_missing_description.len(), 3);
    assert!(report.stats.finished_at >= report.stats.started_at);
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_report_with_issue() {
    // Nothing listens on port 1; the start URL itself fails to fetch.
    let report = crawl_website("http://127.0.0.1:1/", settings(), None)
        .await
        .unwrap();

    assert!(report.pages.is_empty());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].category, IssueCategory::Technical);
    assert_eq!(report.issues[0].severity, Severity::High);
    assert_eq!(report.summary.total_pages, 0);
}

#[tokio::test]
async fn test_invalid_start_url_is_an_error() {
    let result = crawl_website("definitely not a url", settings(), None).await;
    assert!(result.is_err());
}

// Tests for cross-page issue detection

use sitewarden_core::audit::{collect_issues, IssueCategory, IssueType, Severity};
use sitewarden_crawler::{CrawlPage, FetchFailure};

fn page(url: &str, title: Option<&str>, description: Option<&str>) -> CrawlPage {
    let mut page = CrawlPage::new(url.to_string(), 200, 0);
    page.title = title.map(str::to_string);
    page.meta_description = description.map(str::to_string);
    page
}

#[test]
fn test_fetch_failure_becomes_technical_error() {
    let failures = vec![FetchFailure::new(
        "https://example.com/down".to_string(),
        1,
        "connection refused".to_string(),
    )];

    let issues = collect_issues(&[], &failures);

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.issue_type, IssueType::Error);
    assert_eq!(issue.category, IssueCategory::Technical);
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.page, "https://example.com/down");
    assert!(issue.description.contains("connection refused"));
}

#[test]
fn test_two_pages_with_same_title_emit_one_issue() {
    let pages = vec![
        page("https://example.com/a", Some("Welcome"), Some("about a")),
        page("https://example.com/b", Some("Welcome"), Some("about b")),
    ];

    let issues = collect_issues(&pages, &[]);
    let duplicates: Vec<_> = issues
        .iter()
        .filter(|i| i.issue == "Duplicate title")
        .collect();

    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].page.contains("https://example.com/a"));
    assert!(duplicates[0].page.contains("https://example.com/b"));
    assert_eq!(duplicates[0].severity, Severity::Medium);
    assert_eq!(duplicates[0].issue_type, IssueType::Warning);
    assert_eq!(duplicates[0].category, IssueCategory::Seo);
    assert!(duplicates[0].description.contains("Welcome"));
}

#[test]
fn test_three_pages_with_same_title_still_one_issue() {
    let pages = vec![
        page("https://example.com/a", Some("Welcome"), None),
        page("https://example.com/b", Some("Welcome"), None),
        page("https://example.com/c", Some("Welcome"), None),
    ];

    let issues = collect_issues(&pages, &[]);
    let duplicates: Vec<_> = issues
        .iter()
        .filter(|i| i.issue == "Duplicate title")
        .collect();

    assert_eq!(duplicates.len(), 1);
    for url in ["/a", "/b", "/c"] {
        assert!(duplicates[0].page.contains(url));
    }
}

#[test]
fn test_distinct_titles_emit_no_duplicate_issue() {
    let pages = vec![
        page("https://example.com/a", Some("Alpha"), Some("d")),
        page("https://example.com/b", Some("Beta"), Some("d2")),
    ];

    let issues = collect_issues(&pages, &[]);

    assert!(!issues.iter().any(|i| i.issue == "Duplicate title"));
}

#[test]
fn test_duplicate_descriptions_detected_separately() {
    let pages = vec![
        page("https://example.com/a", Some("Alpha"), Some("same blurb")),
        page("https://example.com/b", Some("Beta"), Some("same blurb")),
    ];

    let issues = collect_issues(&pages, &[]);
    let duplicates: Vec<_> = issues
        .iter()
        .filter(|i| i.issue == "Duplicate meta description")
        .collect();

    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].description.contains("same blurb"));
}

#[test]
fn test_page_flags_reemitted_with_mapped_severity() {
    let mut missing = page("https://example.com/bare", None, None);
    missing.issues = vec![
        "Missing title tag".to_string(),
        "Missing meta description".to_string(),
        "Missing H1 tag".to_string(),
        "No H2 tags found".to_string(),
        "Non-200 status code: 404".to_string(),
        "2 image(s) missing alt text".to_string(),
    ];

    let issues = collect_issues(&[missing], &[]);

    let by_flag = |flag: &str| {
        issues
            .iter()
            .find(|i| i.issue == flag)
            .unwrap_or_else(|| panic!("no issue for {flag}"))
    };

    assert_eq!(by_flag("Missing title tag").severity, Severity::High);
    assert_eq!(by_flag("Missing H1 tag").severity, Severity::High);
    assert_eq!(by_flag("Missing meta description").severity, Severity::Medium);
    assert_eq!(by_flag("No H2 tags found").severity, Severity::Low);
    assert_eq!(by_flag("Non-200 status code: 404").severity, Severity::Low);
    assert_eq!(
        by_flag("2 image(s) missing alt text").category,
        IssueCategory::Accessibility
    );
}

#[test]
fn test_clean_crawl_has_no_issues() {
    let pages = vec![
        page("https://example.com/a", Some("Alpha"), Some("about a")),
        page("https://example.com/b", Some("Beta"), Some("about b")),
    ];

    let issues = collect_issues(&pages, &[]);

    assert!(issues.is_empty());
}

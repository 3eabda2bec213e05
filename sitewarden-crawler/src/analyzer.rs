use crate::page::{CrawlPage, PageImage};
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use url::Url;

const TITLE_MAX_CHARS: usize = 60;
const DESCRIPTION_MAX_CHARS: usize = 160;

/// Analyze one fetched page: extract structural fields from the markup and
/// flag page-local issues. Pure over its inputs — malformed or empty HTML
/// degrades to absent fields, never an error.
pub fn analyze_page(
    url: &Url,
    html: &str,
    headers: &HashMap<String, String>,
    status_code: u16,
    depth: usize,
) -> CrawlPage {
    let document = Html::parse_document(html);

    let mut page = CrawlPage::new(url.to_string(), status_code, depth);
    page.content_length = html.len();
    page.content_type = headers
        .get("content-type")
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_string());

    page.title = first_text(&document, "title");
    page.meta_description = first_attr(&document, r#"meta[name="description"]"#, "content");
    page.h1 = first_text(&document, "h1");
    page.h2s = all_text(&document, "h2");
    page.h3s = all_text(&document, "h3");
    page.canonical_url = first_attr(&document, r#"link[rel="canonical"]"#, "href");
    page.meta_robots = first_attr(&document, r#"meta[name="robots"]"#, "content");

    extract_links(&document, url, &mut page);
    page.images = extract_images(&document, url);

    flag_issues(&mut page);
    page
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

fn all_text(document: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect()
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn extract_links(document: &Html, page_url: &Url, page: &mut CrawlPage) {
    let selector = Selector::parse("a[href]").unwrap();
    let mut seen = HashSet::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(resolved) = resolve_href(page_url, href)
        {
            let link = resolved.to_string();
            if !seen.insert(link.clone()) {
                continue;
            }
            if resolved.host_str() == page_url.host_str() {
                page.internal_links.push(link);
            } else {
                page.external_links.push(link);
            }
        }
    }
}

fn extract_images(document: &Html, page_url: &Url) -> Vec<PageImage> {
    let selector = Selector::parse("img").unwrap();
    document
        .select(&selector)
        .filter_map(|element| {
            let src = element.value().attr("src")?;
            let resolved = page_url.join(src.trim()).ok()?;
            Some(PageImage {
                src: resolved.to_string(),
                alt: element.value().attr("alt").map(str::to_string),
                title: element.value().attr("title").map(str::to_string),
            })
        })
        .collect()
}

/// Resolve an anchor href to an absolute http(s) URL with the fragment
/// stripped. Non-navigational schemes and bare fragments are dropped.
fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("javascript:")
        || trimmed.starts_with("mailto:")
        || trimmed.starts_with("tel:")
        || trimmed.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(trimmed).ok()?;
    resolved.set_fragment(None);

    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

fn flag_issues(page: &mut CrawlPage) {
    match &page.title {
        None => page.issues.push("Missing title tag".to_string()),
        Some(title) => {
            let chars = title.chars().count();
            if chars > TITLE_MAX_CHARS {
                page.issues.push(format!("Title too long ({chars} characters)"));
            }
        }
    }

    match &page.meta_description {
        None => page.issues.push("Missing meta description".to_string()),
        Some(description) => {
            let chars = description.chars().count();
            if chars > DESCRIPTION_MAX_CHARS {
                page.issues
                    .push(format!("Meta description too long ({chars} characters)"));
            }
        }
    }

    if page.h1.is_none() {
        page.issues.push("Missing H1 tag".to_string());
    }
    if page.h2s.is_empty() {
        page.issues.push("No H2 tags found".to_string());
    }
    if page.status_code != 200 {
        page.issues
            .push(format!("Non-200 status code: {}", page.status_code));
    }

    let missing_alt = page
        .images
        .iter()
        .filter(|image| image.alt.as_deref().is_none_or(|alt| alt.trim().is_empty()))
        .count();
    if missing_alt > 0 {
        page.issues
            .push(format!("{missing_alt} image(s) missing alt text"));
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/about").unwrap()
    }

    fn html_headers() -> HashMap<String, String> {
        HashMap::from([(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        )])
    }

    const FULL_PAGE: &str = r#"<html><head>
        <title>  About &amp; Team  </title>
        <meta name="description" content="Who we are">
        <meta name="robots" content="index, follow">
        <link rel="canonical" href="https://example.com/about">
        </head><body>
        <h1>About us</h1>
        <h2>History</h2>
        <h2>People</h2>
        <h3>Founders</h3>
        <a href="/contact">Contact</a>
        <a href="/contact#form">Contact form</a>
        <a href="https://other.org/partner">Partner</a>
        <a href="mailto:hi@example.com">Mail</a>
        <a href="javascript:void(0)">Noop</a>
        <img src="/logo.png" alt="Our logo">
        <img src="/team.jpg" alt="">
        <img src="/office.jpg" title="The office">
        </body></html>"#;

    #[test]
    fn test_extracts_structural_fields() {
        let page = analyze_page(&page_url(), FULL_PAGE, &html_headers(), 200, 1);

        assert_eq!(page.title.as_deref(), Some("About & Team"));
        assert_eq!(page.meta_description.as_deref(), Some("Who we are"));
        assert_eq!(page.h1.as_deref(), Some("About us"));
        assert_eq!(page.h2s, vec!["History", "People"]);
        assert_eq!(page.h3s, vec!["Founders"]);
        assert_eq!(
            page.canonical_url.as_deref(),
            Some("https://example.com/about")
        );
        assert_eq!(page.meta_robots.as_deref(), Some("index, follow"));
        assert_eq!(page.content_type.as_deref(), Some("text/html"));
        assert_eq!(page.depth, 1);
    }

    #[test]
    fn test_partitions_and_dedupes_links() {
        let page = analyze_page(&page_url(), FULL_PAGE, &html_headers(), 200, 0);

        // /contact and /contact#form collapse to one internal link.
        assert_eq!(page.internal_links, vec!["https://example.com/contact"]);
        assert_eq!(page.external_links, vec!["https://other.org/partner"]);
    }

    #[test]
    fn test_collects_images_and_flags_missing_alt() {
        let page = analyze_page(&page_url(), FULL_PAGE, &html_headers(), 200, 0);

        assert_eq!(page.images.len(), 3);
        assert_eq!(page.images[0].src, "https://example.com/logo.png");
        assert_eq!(page.images[2].title.as_deref(), Some("The office"));
        // Empty alt and absent alt both count as missing.
        assert!(
            page.issues
                .iter()
                .any(|issue| issue == "2 image(s) missing alt text")
        );
    }

    #[test]
    fn test_empty_html_flags_all_missing_fields() {
        let page = analyze_page(&page_url(), "", &html_headers(), 200, 0);

        assert_eq!(page.title, None);
        assert_eq!(page.h1, None);
        assert!(page.internal_links.is_empty());
        assert!(page.issues.contains(&"Missing title tag".to_string()));
        assert!(page.issues.contains(&"Missing meta description".to_string()));
        assert!(page.issues.contains(&"Missing H1 tag".to_string()));
        assert!(page.issues.contains(&"No H2 tags found".to_string()));
    }

    #[test]
    fn test_length_thresholds() {
        let long_title = "t".repeat(61);
        let long_description = "d".repeat(161);
        let html = format!(
            r#"<html><head><title>{long_title}</title>
            <meta name="description" content="{long_description}"></head>
            <body><h1>H</h1><h2>H</h2></body></html>"#
        );
        let page = analyze_page(&page_url(), &html, &html_headers(), 200, 0);

        assert!(
            page.issues
                .contains(&"Title too long (61 characters)".to_string())
        );
        assert!(
            page.issues
                .contains(&"Meta description too long (161 characters)".to_string())
        );
    }

    #[test]
    fn test_boundary_lengths_are_fine() {
        let title = "t".repeat(60);
        let description = "d".repeat(160);
        let html = format!(
            r#"<html><head><title>{title}</title>
            <meta name="description" content="{description}"></head>
            <body><h1>H</h1><h2>H</h2></body></html>"#
        );
        let page = analyze_page(&page_url(), &html, &html_headers(), 200, 0);

        assert!(page.issues.is_empty());
    }

    #[test]
    fn test_non_200_status_flagged() {
        let page = analyze_page(&page_url(), "<html></html>", &html_headers(), 404, 0);
        assert!(
            page.issues
                .contains(&"Non-200 status code: 404".to_string())
        );
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let first = analyze_page(&page_url(), FULL_PAGE, &html_headers(), 200, 2);
        let mut second = analyze_page(&page_url(), FULL_PAGE, &html_headers(), 200, 2);

        // Everything except the wall-clock stamp must be identical.
        second.crawled_at = first.crawled_at;
        assert_eq!(first, second);
    }
}

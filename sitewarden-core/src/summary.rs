use serde::{Deserialize, Serialize};
use sitewarden_crawler::CrawlPage;
use std::collections::HashMap;

const TOP_PAGES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageWeight {
    pub url: String,
    pub content_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTiming {
    pub url: String,
    pub response_time_ms: u64,
}

/// Pages sharing one exact field value, in first-seen crawl order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub value: String,
    pub pages: Vec<String>,
}

/// Aggregate statistics over a completed crawl. Plain sort-and-slice —
/// nothing here is inferred or scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub total_pages: usize,
    pub avg_response_time_ms: u64,
    pub largest_pages: Vec<PageWeight>,
    pub slowest_pages: Vec<PageTiming>,
    pub pages_missing_title: Vec<String>,
    pub pages_missing_description: Vec<String>,
    pub duplicate_titles: Vec<DuplicateGroup>,
    pub duplicate_descriptions: Vec<DuplicateGroup>,
}

pub fn build_summary(pages: &[CrawlPage]) -> CrawlSummary {
    let avg_response_time_ms = if pages.is_empty() {
        0
    } else {
        pages.iter().map(|p| p.response_time_ms).sum::<u64>() / pages.len() as u64
    };

    let mut largest_pages: Vec<PageWeight> = pages
        .iter()
        .map(|p| PageWeight {
            url: p.url.clone(),
            content_length: p.content_length,
        })
        .collect();
    largest_pages.sort_by(|a, b| b.content_length.cmp(&a.content_length));
    largest_pages.truncate(TOP_PAGES);

    let mut slowest_pages: Vec<PageTiming> = pages
        .iter()
        .map(|p| PageTiming {
            url: p.url.clone(),
            response_time_ms: p.response_time_ms,
        })
        .collect();
    slowest_pages.sort_by(|a, b| b.response_time_ms.cmp(&a.response_time_ms));
    slowest_pages.truncate(TOP_PAGES);

    CrawlSummary {
        total_pages: pages.len(),
        avg_response_time_ms,
        largest_pages,
        slowest_pages,
        pages_missing_title: pages
            .iter()
            .filter(|p| p.title.is_none())
            .map(|p| p.url.clone())
            .collect(),
        pages_missing_description: pages
            .iter()
            .filter(|p| p.meta_description.is_none())
            .map(|p| p.url.clone())
            .collect(),
        duplicate_titles: duplicate_title_groups(pages),
        duplicate_descriptions: duplicate_description_groups(pages),
    }
}

pub fn duplicate_title_groups(pages: &[CrawlPage]) -> Vec<DuplicateGroup> {
    duplicate_groups(pages, |p| p.title.as_deref())
}

pub fn duplicate_description_groups(pages: &[CrawlPage]) -> Vec<DuplicateGroup> {
    duplicate_groups(pages, |p| p.meta_description.as_deref())
}

/// Group pages by an exact non-empty field value and keep only groups with
/// more than one member, in first-seen order.
fn duplicate_groups<'a, F>(pages: &'a [CrawlPage], field: F) -> Vec<DuplicateGroup>
where
    F: Fn(&'a CrawlPage) -> Option<&'a str>,
{
    let mut members: HashMap<&str, Vec<String>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for page in pages {
        if let Some(value) = field(page).filter(|v| !v.is_empty()) {
            let entry = members.entry(value).or_default();
            if entry.is_empty() {
                order.push(value);
            }
            entry.push(page.url.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|value| {
            let pages = members.remove(value)?;
            (pages.len() > 1).then(|| DuplicateGroup {
                value: value.to_string(),
                pages,
            })
        })
        .collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One image reference found on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// Everything extracted from a single fetched page, plus the page-local
/// issues flagged during analysis. Built once per successful fetch and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlPage {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    pub h2s: Vec<String>,
    pub h3s: Vec<String>,
    pub status_code: u16,
    pub response_time_ms: u64,
    pub content_length: usize,
    pub content_type: Option<String>,
    pub canonical_url: Option<String>,
    pub meta_robots: Option<String>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub images: Vec<PageImage>,
    pub issues: Vec<String>,
    pub depth: usize,
    pub crawled_at: DateTime<Utc>,
}

impl CrawlPage {
    pub fn new(url: String, status_code: u16, depth: usize) -> Self {
        Self {
            url,
            title: None,
            meta_description: None,
            h1: None,
            h2s: Vec::new(),
            h3s: Vec::new(),
            status_code,
            response_time_ms: 0,
            content_length: 0,
            content_type: None,
            canonical_url: None,
            meta_robots: None,
            internal_links: Vec::new(),
            external_links: Vec::new(),
            images: Vec::new(),
            issues: Vec::new(),
            depth,
            crawled_at: Utc::now(),
        }
    }
}

/// A page the crawler attempted but could not fetch. Failures never abort
/// the crawl; they travel alongside the page list so the audit layer can
/// turn them into issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub url: String,
    pub depth: usize,
    pub error: String,
}

impl FetchFailure {
    pub fn new(url: String, depth: usize, error: String) -> Self {
        Self { url, depth, error }
    }
}

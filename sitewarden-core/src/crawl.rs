use crate::audit::{collect_issues, CrawlIssue};
use crate::summary::{build_summary, CrawlSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitewarden_crawler::{CrawlError, CrawlPage, Crawler, ProgressCallback, DEFAULT_USER_AGENT};
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;

/// Caller-facing crawl options, echoed verbatim into the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSettings {
    pub max_pages: usize,
    pub max_depth: usize,
    pub delay_ms: u64,
    pub respect_robots: bool,
    pub follow_external_links: bool,
    pub user_agent: String,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_depth: 3,
            delay_ms: 1000,
            respect_robots: true,
            follow_external_links: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub pages_per_second: f64,
}

/// The final aggregate of one crawl: pages in BFS order, crawl-level
/// issues, summary statistics, the settings used and timing stats. Built
/// once at crawl completion; whoever persists or renders it takes it
/// as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    pub crawl_id: String,
    pub start_url: String,
    pub pages: Vec<CrawlPage>,
    pub issues: Vec<CrawlIssue>,
    pub summary: CrawlSummary,
    pub settings: CrawlSettings,
    pub stats: CrawlStats,
}

/// Crawl a website and assemble the full audit report.
///
/// Only an invalid start URL fails the call; per-page problems surface as
/// issues inside an otherwise complete report.
pub async fn crawl_website(
    start_url: &str,
    settings: CrawlSettings,
    progress: Option<ProgressCallback>,
) -> Result<CrawlReport, CrawlError> {
    let started_at = Utc::now();
    let clock = Instant::now();

    let mut crawler = Crawler::new()
        .with_max_pages(settings.max_pages)
        .with_max_depth(settings.max_depth)
        .with_delay(Duration::from_millis(settings.delay_ms))
        .with_respect_robots(settings.respect_robots)
        .with_follow_external_links(settings.follow_external_links)
        .with_user_agent(settings.user_agent.clone());
    if let Some(callback) = progress {
        crawler = crawler.with_progress_callback(callback);
    }

    let outcome = crawler.crawl(start_url).await?;
    let issues = collect_issues(&outcome.pages, &outcome.failures);
    let summary = build_summary(&outcome.pages);

    let duration = clock.elapsed();
    let pages_per_second = if duration.as_secs_f64() > 0.0 {
        outcome.pages.len() as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    info!(
        "Audit of {} finished: {} page(s), {} issue(s) in {} ms",
        outcome.start_url,
        outcome.pages.len(),
        issues.len(),
        duration.as_millis()
    );

    Ok(CrawlReport {
        crawl_id: Uuid::new_v4().to_string(),
        start_url: outcome.start_url,
        pages: outcome.pages,
        issues,
        summary,
        settings,
        stats: CrawlStats {
            started_at,
            finished_at: Utc::now(),
            duration_ms: duration.as_millis() as u64,
            pages_per_second,
        },
    })
}

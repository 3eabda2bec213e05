use crate::analyzer::analyze_page;
use crate::error::{CrawlError, Result};
use crate::fetcher::{FetchOptions, PageFetcher};
use crate::page::{CrawlPage, FetchFailure};
use crate::robots::RobotsRules;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "sitewarden/0.2 (+https://github.com/mvrdev/sitewarden)";

/// Snapshot handed to the progress callback once per page attempt.
/// Observational only — it never alters the crawl.
#[derive(Debug, Clone)]
pub struct CrawlProgress {
    pub current: usize,
    pub total_estimate: usize,
    pub current_url: String,
}

pub type ProgressCallback = Arc<dyn Fn(CrawlProgress) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub max_pages: usize,
    pub max_depth: usize,
    pub delay: Duration,
    pub respect_robots: bool,
    pub follow_external_links: bool,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_body_size: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_depth: 3,
            delay: Duration::from_millis(1000),
            respect_robots: true,
            follow_external_links: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            max_body_size: 5 * 1024 * 1024,
        }
    }
}

/// What a finished crawl hands back: pages in fetch (BFS) order plus the
/// attempts that failed. Zero pages with failures present means the crawl
/// ran but found nothing fetchable — not an error.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub start_url: String,
    pub pages: Vec<CrawlPage>,
    pub failures: Vec<FetchFailure>,
}

/// Breadth-first crawler over a site's internal link graph.
///
/// The loop is deliberately single-threaded and strictly sequential: one
/// fetch completes before the next begins, with a politeness delay in
/// between. That keeps the visited-set and frontier single-owner and the
/// load on the target site bounded.
pub struct Crawler {
    config: CrawlConfig,
    progress_callback: Option<ProgressCallback>,
    cancelled: Arc<AtomicBool>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_config(CrawlConfig::default())
    }

    pub fn with_config(config: CrawlConfig) -> Self {
        Self {
            config,
            progress_callback: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn with_respect_robots(mut self, respect_robots: bool) -> Self {
        self.config.respect_robots = respect_robots;
        self
    }

    pub fn with_follow_external_links(mut self, follow: bool) -> Self {
        self.config.follow_external_links = follow;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.max_body_size = max_body_size;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Flag checked at the top of every loop iteration; setting it stops
    /// the crawl after the in-flight page.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub async fn crawl(&self, start_url: &str) -> Result<CrawlOutcome> {
        let mut start = Url::parse(start_url)
            .map_err(|e| CrawlError::InvalidUrl(format!("{start_url}: {e}")))?;
        if !matches!(start.scheme(), "http" | "https") {
            return Err(CrawlError::InvalidUrl(format!(
                "{start_url}: only http and https URLs can be crawled"
            )));
        }
        start.set_fragment(None);

        info!(
            "Starting crawl of {} (max {} pages, max depth {})",
            start, self.config.max_pages, self.config.max_depth
        );

        let fetcher = PageFetcher::new(&self.config.user_agent, self.config.timeout)?;
        let rules = if self.config.respect_robots {
            RobotsRules::fetch(&fetcher, &start, &self.config.user_agent).await
        } else {
            RobotsRules::empty()
        };

        // Frontier entries are (normalized url, depth). URLs are marked
        // visited when enqueued, so the same URL can never sit in the
        // queue twice no matter how many pages link to it.
        let mut frontier: VecDeque<(String, usize)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut pages: Vec<CrawlPage> = Vec::new();
        let mut failures: Vec<FetchFailure> = Vec::new();

        visited.insert(start.to_string());
        frontier.push_back((start.to_string(), 0));

        let fetch_options = FetchOptions::get(self.config.timeout, self.config.max_body_size);

        while pages.len() < self.config.max_pages {
            if self.cancelled.load(Ordering::Relaxed) {
                info!("Crawl cancelled, stopping");
                break;
            }

            let Some((entry_url, depth)) = frontier.pop_front() else {
                break;
            };

            let Ok(url) = Url::parse(&entry_url) else {
                continue;
            };
            if depth > self.config.max_depth {
                debug!("Skipping {} (depth {} exceeds limit)", url, depth);
                continue;
            }
            if self.config.respect_robots && rules.is_blocked(&url) {
                debug!("Skipping {} (blocked by robots.txt)", url);
                continue;
            }

            if let Some(callback) = &self.progress_callback {
                let current = pages.len() + failures.len() + 1;
                callback(CrawlProgress {
                    current,
                    total_estimate: (current + frontier.len()).min(self.config.max_pages),
                    current_url: url.to_string(),
                });
            }

            match fetcher.fetch(&url, &fetch_options).await {
                Ok(fetched) => {
                    debug!(
                        "Fetched {} ({} in {:?})",
                        url, fetched.status_code, fetched.response_time
                    );
                    let mut page =
                        analyze_page(&url, &fetched.body, &fetched.headers, fetched.status_code, depth);
                    page.response_time_ms = fetched.response_time.as_millis() as u64;

                    if depth < self.config.max_depth {
                        let mut discovered: Vec<&String> = page.internal_links.iter().collect();
                        if self.config.follow_external_links {
                            discovered.extend(page.external_links.iter());
                        }
                        for link in discovered {
                            if visited.insert(link.clone()) {
                                frontier.push_back((link.clone(), depth + 1));
                            }
                        }
                    }

                    pages.push(page);
                }
                Err(e) => {
                    // A single page failing never aborts the crawl.
                    warn!("Fetch failed for {}: {}", url, e);
                    failures.push(FetchFailure::new(url.to_string(), depth, e.to_string()));
                }
            }

            if !frontier.is_empty() && pages.len() < self.config.max_pages && !self.config.delay.is_zero()
            {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        info!(
            "Crawl of {} complete: {} page(s), {} failure(s)",
            start,
            pages.len(),
            failures.len()
        );

        Ok(CrawlOutcome {
            start_url: start.to_string(),
            pages,
            failures,
        })
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

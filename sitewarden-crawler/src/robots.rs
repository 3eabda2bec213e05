use crate::fetcher::{FetchOptions, PageFetcher};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const ROBOTS_TIMEOUT: Duration = Duration::from_secs(5);
const ROBOTS_MAX_SIZE: usize = 100 * 1024;

/// Disallow rules from a site's robots.txt, resolved for one user-agent.
///
/// This is a best-effort filter, not a strict robots.txt validator:
/// `Disallow` values are matched as path prefixes (a trailing `*` is
/// treated as part of the prefix), `Allow` overrides and `Crawl-delay`
/// are not interpreted, and unparseable lines are skipped. A missing or
/// unfetchable robots.txt yields the empty rule set, which allows
/// everything.
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    disallow: Vec<String>,
}

impl RobotsRules {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch and parse `/robots.txt` for the origin of `origin_url`.
    /// Every failure path is fail-open.
    pub async fn fetch(fetcher: &PageFetcher, origin_url: &Url, user_agent: &str) -> Self {
        let robots_url = match origin_url.join("/robots.txt") {
            Ok(url) => url,
            Err(_) => return Self::empty(),
        };

        let options = FetchOptions::get(ROBOTS_TIMEOUT, ROBOTS_MAX_SIZE);
        match fetcher.fetch(&robots_url, &options).await {
            Ok(page) if (200..300).contains(&page.status_code) => {
                let rules = Self::parse(&page.body, user_agent);
                debug!(
                    "Parsed {} disallow rule(s) from {}",
                    rules.len(),
                    robots_url
                );
                rules
            }
            Ok(page) => {
                debug!(
                    "robots.txt at {} returned {}, allowing all",
                    robots_url, page.status_code
                );
                Self::empty()
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}, allowing all", robots_url, e);
                Self::empty()
            }
        }
    }

    /// Parse robots.txt content, collecting `Disallow` values from blocks
    /// whose `User-agent` is `*` or matches `user_agent` case-insensitively.
    pub fn parse(content: &str, user_agent: &str) -> Self {
        let target = user_agent.to_lowercase();
        let mut in_matching_block = false;
        let mut disallow = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_lowercase().as_str() {
                "user-agent" => {
                    in_matching_block = value == "*" || target.contains(&value.to_lowercase());
                }
                "disallow" => {
                    if in_matching_block && !value.is_empty() {
                        disallow.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        Self { disallow }
    }

    /// True when the URL's path is covered by any disallow rule.
    pub fn is_blocked(&self, url: &Url) -> bool {
        let path = url.path();
        self.disallow.iter().any(|rule| {
            if rule == "/" {
                return true;
            }
            let prefix = rule.strip_suffix('*').unwrap_or(rule);
            path.starts_with(prefix)
        })
    }

    pub fn len(&self) -> usize {
        self.disallow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disallow.is_empty()
    }
}

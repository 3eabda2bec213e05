use crate::error::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// How to fetch a URL: full GET for the crawler, HEAD for lightweight
/// status checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FetchMethod {
    Get,
    Head,
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_size: usize,
    pub method: FetchMethod,
}

impl FetchOptions {
    pub fn get(timeout: Duration, max_size: usize) -> Self {
        Self {
            timeout,
            max_size,
            method: FetchMethod::Get,
        }
    }

    pub fn head(timeout: Duration) -> Self {
        Self {
            timeout,
            max_size: 0,
            method: FetchMethod::Head,
        }
    }
}

/// A fetched response with headers flattened to lowercase names so the
/// analyzer stays free of HTTP client types.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub response_time: Duration,
}

impl FetchedPage {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }
}

/// HTTP boundary for the crawl loop. One fetcher (and one pooled client)
/// is built per crawl.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage> {
        debug!("Fetching {} ({:?})", url, options.method);

        let started = Instant::now();
        let request = match options.method {
            FetchMethod::Get => self.client.get(url.clone()),
            FetchMethod::Head => self.client.head(url.clone()),
        };
        let mut response = request.timeout(options.timeout).send().await?;

        let status_code = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        // Bodies are read chunk by chunk and truncated at max_size rather
        // than rejected; a partial body still yields useful analysis.
        let mut body = Vec::new();
        if options.method == FetchMethod::Get {
            while let Some(chunk) = response.chunk().await? {
                let remaining = options.max_size.saturating_sub(body.len());
                if remaining == 0 {
                    debug!("Body for {} truncated at {} bytes", url, options.max_size);
                    break;
                }
                let take = remaining.min(chunk.len());
                body.extend_from_slice(&chunk[..take]);
                if take < chunk.len() {
                    debug!("Body for {} truncated at {} bytes", url, options.max_size);
                    break;
                }
            }
        }

        Ok(FetchedPage {
            status_code,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            response_time: started.elapsed(),
        })
    }
}

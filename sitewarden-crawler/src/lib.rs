pub mod analyzer;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod page;
pub mod robots;

pub use crawler::{
    CrawlConfig, CrawlOutcome, CrawlProgress, Crawler, ProgressCallback, DEFAULT_USER_AGENT,
};
pub use error::CrawlError;
pub use fetcher::{FetchMethod, FetchOptions, FetchedPage, PageFetcher};
pub use page::{CrawlPage, FetchFailure, PageImage};
pub use robots::RobotsRules;

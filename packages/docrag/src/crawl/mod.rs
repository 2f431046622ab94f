//! Fetching, link filtering and the breadth-first crawl loop.

pub mod crawler;
pub mod fetcher;
pub mod filter;

pub use crawler::{CrawlOutcome, Crawler};
pub use fetcher::{Fetcher, HttpFetcher};
pub use filter::should_follow;

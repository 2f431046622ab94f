//! Crawl configuration.

use serde::{Deserialize, Serialize};

/// Configuration for crawl operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of pages to visit. Must be at least 1; this and
    /// the visited set are the crawl's only termination guarantees.
    pub max_pages: usize,

    /// Regex that the resolved URL must match for a link to be
    /// followed. Scopes the crawl to a documentation subsection.
    pub section_pattern: String,

    /// Per-request fetch timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// Fixed delay after every fetch attempt, in milliseconds.
    pub politeness_delay_ms: u64,

    /// Cap on queued-but-unvisited URLs. A pathological page with
    /// thousands of in-scope links would otherwise grow the frontier
    /// without bound; excess links are dropped.
    pub max_frontier: usize,

    /// Branding suffix stripped from page titles when present.
    pub title_suffix: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 30,
            section_pattern: "/langgraph/".to_string(),
            fetch_timeout_secs: 15,
            politeness_delay_ms: 500,
            max_frontier: 1000,
            title_suffix: " | 🦜️🔗 LangChain".to_string(),
        }
    }
}

impl CrawlConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page budget.
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }

    /// Set the section-inclusion pattern.
    pub fn with_section_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.section_pattern = pattern.into();
        self
    }

    /// Set the inter-request delay.
    pub fn with_politeness_delay_ms(mut self, ms: u64) -> Self {
        self.politeness_delay_ms = ms;
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    /// Set the frontier cap.
    pub fn with_max_frontier(mut self, max: usize) -> Self {
        self.max_frontier = max;
        self
    }

    /// Set the title suffix to strip.
    pub fn with_title_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.title_suffix = suffix.into();
        self
    }
}

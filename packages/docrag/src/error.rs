//! Typed errors for the documentation RAG library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can
//! match on the failure mode. Per-page fetch and extraction failures
//! are recovered inside the crawl loop and never surface here; only
//! whole-operation failures do.

use thiserror::Error;

/// Errors surfaced by the ingestion and query orchestrators.
///
/// Display strings double as the human-readable messages returned at
/// the service boundary.
#[derive(Debug, Error)]
pub enum RagError {
    /// Ingestion was called with neither documents nor a URL that
    /// yielded any.
    #[error("No documents provided or scraped")]
    EmptyInput,

    /// Query or stats requested before any ingestion built an index.
    #[error("No documents have been ingested yet. Please ingest documents first.")]
    NoIndex,

    /// Crawl could not start (bad seed URL or section pattern).
    #[error("crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    /// Retrieval engine (index/embedding) failure.
    #[error("retrieval engine error: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Generation collaborator failure.
    #[error("generation error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error (missing key, bad client setup).
    #[error("config error: {0}")]
    Config(String),
}

/// Errors that prevent a crawl from starting at all.
///
/// Failures of individual pages inside a running crawl are recorded as
/// [`crate::types::SkipReason`]s in the crawl report instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Seed URL could not be parsed.
    #[error("invalid seed URL: {url}")]
    InvalidUrl { url: String },

    /// Section-inclusion pattern is not a valid regex.
    #[error("invalid section pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A single-page fetch failure, recovered locally by the crawl loop.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx response.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Request exceeded the fetch timeout.
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Connection or protocol error.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Result type alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, RagError>;

/// Result type alias for single-page fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

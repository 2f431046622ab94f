//! Retrieval-augmented question answering over crawled documentation.
//!
//! The pipeline: a breadth-first [`crawl::Crawler`] fetches pages and
//! extracts their main content, the [`service::RagService`] hands the
//! resulting documents to a [`traits::RetrievalEngine`] for indexing,
//! and queries run similarity search plus a [`traits::Generator`] to
//! produce grounded answers.
//!
//! Backends are trait seams: [`index::VectorIndex`] is the bundled
//! in-process engine and [`ai::OpenAi`] the bundled model client, but
//! anything implementing the traits plugs in (the test doubles in
//! [`testing`] do exactly that).

pub mod ai;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod index;
pub mod service;
pub mod testing;
pub mod traits;
pub mod types;

pub use crawl::{CrawlOutcome, Crawler, Fetcher, HttpFetcher};
pub use error::{CrawlError, FetchError, RagError, Result};
pub use service::{
    Answer, HealthReport, IngestRequest, IngestSummary, RagService, Source, StatsReport,
};
pub use traits::{Embedder, Generator, RetrievalEngine, ScoredPassage};
pub use types::{CrawlConfig, CrawlRecord, CrawlReport, Document, DocumentMetadata};

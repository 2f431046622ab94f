//! Ingestion and query orchestration.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::crawl::{Crawler, Fetcher};
use crate::error::{RagError, Result};
use crate::traits::{Generator, RetrievalEngine};
use crate::types::{CrawlConfig, CrawlRecord, CrawlReport, Document, DocumentMetadata};

/// Characters of passage text included per source in a query answer.
const SOURCE_PREVIEW_CHARS: usize = 300;

/// What to ingest: explicit documents, or a URL to crawl for them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestRequest {
    /// Pre-extracted documents. When present, no crawl happens.
    #[serde(default)]
    pub documents: Option<Vec<Document>>,

    /// Seed URL to crawl when no documents are given.
    #[serde(default)]
    pub url: Option<String>,

    /// Page-budget override for this crawl.
    #[serde(default)]
    pub max_pages: Option<usize>,
}

/// Outcome of a successful ingestion.
#[derive(Debug, Serialize)]
pub struct IngestSummary {
    /// Documents handed to the retrieval engine.
    pub document_count: usize,

    /// Ledger entries from this run's crawl (zero for explicit
    /// documents).
    pub pages_scraped: usize,

    /// Total characters across ingested documents.
    pub total_characters: usize,

    /// Full crawl report when a crawl ran.
    #[serde(skip)]
    pub report: Option<CrawlReport>,
}

/// One supporting passage in a query answer.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    /// Passage text, truncated to a preview length.
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,

    /// Provenance of the document the passage was chunked from.
    pub metadata: DocumentMetadata,
}

/// A generated answer with its supporting sources.
#[derive(Debug, Serialize)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<Source>,
}

/// Index and ledger state for the stats endpoint.
#[derive(Debug)]
pub enum StatsReport {
    /// Nothing has been ingested yet.
    NoIndex,

    Ready {
        /// Ledger entries from the most recent crawl-backed ingestion.
        document_count: usize,

        /// Passages held by the retrieval engine.
        vector_count: usize,

        pages: Vec<CrawlRecord>,
    },
}

/// Liveness snapshot for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub index_ready: bool,
    pub documents: usize,
}

/// Long-lived orchestrator tying the crawler, retrieval engine and
/// generator together.
///
/// One instance serves the whole process. The scraped-pages ledger
/// lives here and describes the most recent crawl-backed ingestion
/// only; [`ingest`](RagService::ingest) clears it before doing
/// anything else.
pub struct RagService {
    engine: Arc<dyn RetrievalEngine>,
    generator: Arc<dyn Generator>,
    fetcher: Arc<dyn Fetcher>,
    crawl_config: CrawlConfig,
    ledger: RwLock<Vec<CrawlRecord>>,
}

impl RagService {
    pub fn new(
        engine: Arc<dyn RetrievalEngine>,
        generator: Arc<dyn Generator>,
        fetcher: Arc<dyn Fetcher>,
        crawl_config: CrawlConfig,
    ) -> Self {
        Self {
            engine,
            generator,
            fetcher,
            crawl_config,
            ledger: RwLock::new(Vec::new()),
        }
    }

    /// Ingest documents, crawling for them first when only a URL was
    /// given.
    ///
    /// The ledger is reset up front and repopulated from the crawl
    /// before the engine runs, so a failed engine call still leaves
    /// the pages that were scraped visible.
    pub async fn ingest(&self, request: IngestRequest) -> Result<IngestSummary> {
        self.ledger.write().unwrap().clear();

        let mut report = None;
        let documents = match request.documents {
            Some(documents) if !documents.is_empty() => documents,
            _ => {
                let url = request.url.as_deref().ok_or(RagError::EmptyInput)?;

                let mut config = self.crawl_config.clone();
                if let Some(max_pages) = request.max_pages {
                    config = config.with_max_pages(max_pages);
                }

                let crawler = Crawler::new(self.fetcher.clone(), config);
                let outcome = crawler.crawl(url).await?;

                let records: Vec<CrawlRecord> =
                    outcome.documents.iter().map(CrawlRecord::from).collect();
                *self.ledger.write().unwrap() = records;

                report = Some(outcome.report);
                outcome.documents
            }
        };

        if documents.is_empty() {
            return Err(RagError::EmptyInput);
        }

        if self.engine.is_ready() {
            info!(documents = documents.len(), "inserting into existing index");
            for document in &documents {
                self.engine.insert(document).await?;
            }
        } else {
            info!(documents = documents.len(), "building new index");
            self.engine.build(&documents).await?;
        }

        let total_characters = documents.iter().map(Document::char_count).sum();
        Ok(IngestSummary {
            document_count: documents.len(),
            pages_scraped: self.ledger.read().unwrap().len(),
            total_characters,
            report,
        })
    }

    /// Answer a question over the ingested corpus.
    pub async fn answer(&self, question: &str, top_k: usize) -> Result<Answer> {
        if !self.engine.is_ready() {
            return Err(RagError::NoIndex);
        }

        let passages = self.engine.similarity_search(question, top_k).await?;
        let answer = self.generator.generate(question, &passages).await?;

        let sources = passages
            .into_iter()
            .map(|p| Source {
                text: truncate_preview(&p.text),
                score: p.score,
                metadata: p.metadata,
            })
            .collect();

        Ok(Answer { answer, sources })
    }

    /// Index and ledger state.
    pub async fn stats(&self) -> Result<StatsReport> {
        if !self.engine.is_ready() {
            return Ok(StatsReport::NoIndex);
        }

        let pages = self.ledger.read().unwrap().clone();
        Ok(StatsReport::Ready {
            document_count: pages.len(),
            vector_count: self.engine.count().await?,
            pages,
        })
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            index_ready: self.engine.is_ready(),
            documents: self.ledger.read().unwrap().len(),
        }
    }

    /// Ledger entries from the most recent ingestion's crawl. Survives
    /// an engine failure so callers can report partial progress.
    pub fn ledger(&self) -> Vec<CrawlRecord> {
        self.ledger.read().unwrap().clone()
    }

    /// Number of ledger entries from the most recent ingestion's crawl.
    pub fn pages_scraped(&self) -> usize {
        self.ledger.read().unwrap().len()
    }
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() > SOURCE_PREVIEW_CHARS {
        let truncated: String = text.chars().take(SOURCE_PREVIEW_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Document, DocumentMetadata};

/// A passage returned by similarity search, with the metadata of the
/// document it was chunked from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub text: String,

    /// Similarity score when the engine produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,

    pub metadata: DocumentMetadata,
}

/// Storage and retrieval over ingested documents.
///
/// An engine starts empty. The first ingestion calls [`build`] with the
/// whole batch; later ingestions call [`insert`] per document so the
/// existing index is extended rather than replaced.
///
/// [`build`]: RetrievalEngine::build
/// [`insert`]: RetrievalEngine::insert
#[async_trait]
pub trait RetrievalEngine: Send + Sync {
    /// Whether an index exists and can serve queries.
    fn is_ready(&self) -> bool;

    /// Build a fresh index over `documents`, replacing any prior state.
    async fn build(&self, documents: &[Document]) -> Result<()>;

    /// Add one document to an already built index.
    async fn insert(&self, document: &Document) -> Result<()>;

    /// The `k` most similar passages to `query`.
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<ScoredPassage>>;

    /// Number of indexed passages.
    async fn count(&self) -> Result<usize>;
}

//! In-process vector index with cosine similarity and an optional
//! JSON snapshot on disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::index::chunk::chunk_text;
use crate::traits::{Embedder, RetrievalEngine, ScoredPassage};
use crate::types::{Document, DocumentMetadata};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    text: String,
    embedding: Vec<f32>,
    metadata: DocumentMetadata,
}

/// Brute-force vector index. Documents are chunked, embedded and held
/// in memory; search scans every entry.
///
/// With a snapshot path the index reloads its entries at startup and
/// rewrites the file after every mutation, so it survives restarts
/// without an external store.
pub struct VectorIndex<E> {
    embedder: E,
    entries: RwLock<Vec<IndexEntry>>,
    initialized: AtomicBool,
    snapshot_path: Option<PathBuf>,
}

impl<E: Embedder> VectorIndex<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            entries: RwLock::new(Vec::new()),
            initialized: AtomicBool::new(false),
            snapshot_path: None,
        }
    }

    /// Persist to `path` and reload from it if it already holds a
    /// snapshot. A missing or unreadable snapshot starts empty.
    pub fn with_snapshot(embedder: E, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let index = Self {
            embedder,
            entries: RwLock::new(Vec::new()),
            initialized: AtomicBool::new(false),
            snapshot_path: Some(path.clone()),
        };
        index.load_snapshot(&path);
        index
    }

    fn load_snapshot(&self, path: &Path) {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return,
        };
        match serde_json::from_str::<Vec<IndexEntry>>(&raw) {
            Ok(entries) => {
                info!(path = %path.display(), entries = entries.len(), "loaded index snapshot");
                *self.entries.write().unwrap() = entries;
                self.initialized.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt index snapshot");
            }
        }
    }

    /// Snapshot writing is best effort: a failure is logged, never
    /// surfaced, so ingestion still succeeds on a read-only disk.
    fn persist(&self) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let serialized = {
            let entries = self.entries.read().unwrap();
            serde_json::to_string(&*entries)
        };
        let result = serialized
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(path, json));
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to write index snapshot");
        }
    }

    async fn embed_document(&self, document: &Document) -> Result<Vec<IndexEntry>> {
        let chunks = chunk_text(&document.text);
        let embeddings = self.embedder.embed_batch(&chunks).await?;
        Ok(chunks
            .into_iter()
            .zip(embeddings)
            .map(|(text, embedding)| IndexEntry {
                text,
                embedding,
                metadata: document.metadata.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl<E: Embedder> RetrievalEngine for VectorIndex<E> {
    fn is_ready(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn build(&self, documents: &[Document]) -> Result<()> {
        let mut fresh = Vec::new();
        for document in documents {
            fresh.extend(self.embed_document(document).await?);
        }

        info!(documents = documents.len(), entries = fresh.len(), "built vector index");
        *self.entries.write().unwrap() = fresh;
        self.initialized.store(true, Ordering::SeqCst);
        self.persist();
        Ok(())
    }

    async fn insert(&self, document: &Document) -> Result<()> {
        let entries = self.embed_document(document).await?;
        self.entries.write().unwrap().extend(entries);
        self.persist();
        Ok(())
    }

    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<ScoredPassage>> {
        let query_embedding = self.embedder.embed(query).await?;

        let mut scored: Vec<ScoredPassage> = {
            let entries = self.entries.read().unwrap();
            entries
                .iter()
                .map(|entry| ScoredPassage {
                    text: entry.text.clone(),
                    score: Some(cosine_similarity(&query_embedding, &entry.embedding)),
                    metadata: entry.metadata.clone(),
                })
                .collect()
        };

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().unwrap().len())
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

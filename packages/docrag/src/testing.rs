//! Hand-rolled test doubles.
//!
//! These are deliberately simple: deterministic outputs and call
//! recording, no mocking framework.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::crawl::Fetcher;
use crate::error::{FetchError, FetchResult, RagError, Result};
use crate::traits::{Embedder, Generator, RetrievalEngine, ScoredPassage};
use crate::types::Document;

/// Serves canned HTML for registered URLs and 404s everything else,
/// recording fetch order.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    log: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.log.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(html) => Ok(html.clone()),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Embeds text as its letter-frequency histogram. Deterministic, and
/// similar texts get similar vectors, so ranking tests behave.
#[derive(Default)]
pub struct MockEmbedder;

impl MockEmbedder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut counts = vec![0.0f32; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            let idx = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            counts[idx] += 1.0;
        }
        Ok(counts)
    }
}

/// Returns a fixed answer and records every question asked.
pub struct MockGenerator {
    answer: String,
    pub questions: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            questions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, question: &str, _passages: &[ScoredPassage]) -> Result<String> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.answer.clone())
    }
}

/// Records build and insert calls and serves canned passages.
pub struct MockEngine {
    ready: std::sync::atomic::AtomicBool,
    pub built: Mutex<Vec<Vec<Document>>>,
    pub inserted: Mutex<Vec<Document>>,
    pub passages: Vec<ScoredPassage>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            ready: std::sync::atomic::AtomicBool::new(false),
            built: Mutex::new(Vec::new()),
            inserted: Mutex::new(Vec::new()),
            passages: Vec::new(),
        }
    }

    pub fn ready() -> Self {
        let engine = Self::new();
        engine.ready.store(true, std::sync::atomic::Ordering::SeqCst);
        engine
    }

    pub fn with_passages(mut self, passages: Vec<ScoredPassage>) -> Self {
        self.passages = passages;
        self
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalEngine for MockEngine {
    fn is_ready(&self) -> bool {
        self.ready.load(std::sync::atomic::Ordering::SeqCst)
    }

    async fn build(&self, documents: &[Document]) -> Result<()> {
        self.built.lock().unwrap().push(documents.to_vec());
        self.ready.store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, document: &Document) -> Result<()> {
        self.inserted.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn similarity_search(&self, _query: &str, k: usize) -> Result<Vec<ScoredPassage>> {
        Ok(self.passages.iter().take(k).cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.passages.len())
    }
}

/// Fails every operation, for exercising error paths.
pub struct FailingEngine;

#[async_trait]
impl RetrievalEngine for FailingEngine {
    fn is_ready(&self) -> bool {
        false
    }

    async fn build(&self, _documents: &[Document]) -> Result<()> {
        Err(RagError::Engine("engine unavailable".into()))
    }

    async fn insert(&self, _document: &Document) -> Result<()> {
        Err(RagError::Engine("engine unavailable".into()))
    }

    async fn similarity_search(&self, _query: &str, _k: usize) -> Result<Vec<ScoredPassage>> {
        Err(RagError::Engine("engine unavailable".into()))
    }

    async fn count(&self) -> Result<usize> {
        Err(RagError::Engine("engine unavailable".into()))
    }
}

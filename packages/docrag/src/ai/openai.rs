//! OpenAI-backed embedder and answer generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RagError, Result};
use crate::traits::{Embedder, Generator, ScoredPassage};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const CHAT_TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct OpenAi {
    client: reqwest::Client,
    api_key: String,
    model: String,
    embedding_model: String,
    base_url: String,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| RagError::Config("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Point at a different API host, mainly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn chat(&self, system: &str, user: &str) -> std::result::Result<String, BoxedError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: CHAT_TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("chat completion failed with {status}: {body}").into());
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| "chat completion returned no choices".into())
    }

    async fn embeddings(
        &self,
        input: Vec<String>,
    ) -> std::result::Result<Vec<Vec<f32>>, BoxedError> {
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("embedding request failed with {status}: {body}").into());
        }

        let parsed: EmbeddingResponse = response.json().await?;
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
impl Embedder for OpenAi {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self
            .embeddings(vec![text.to_string()])
            .await
            .map_err(RagError::Engine)?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Engine("embedding response was empty".into()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(count = texts.len(), model = %self.embedding_model, "embedding batch");
        self.embeddings(texts.to_vec())
            .await
            .map_err(RagError::Engine)
    }
}

#[async_trait]
impl Generator for OpenAi {
    async fn generate(&self, question: &str, passages: &[ScoredPassage]) -> Result<String> {
        let context = passages
            .iter()
            .enumerate()
            .map(|(i, p)| format!("[{}] {} ({})", i + 1, p.text, p.metadata.source))
            .collect::<Vec<_>>()
            .join("\n\n");

        let system = "You are a documentation assistant. Answer the question using only \
                      the numbered excerpts provided. If the excerpts do not contain the \
                      answer, say so.";
        let user = format!("Excerpts:\n{context}\n\nQuestion: {question}");

        debug!(model = %self.model, passages = passages.len(), "generating answer");
        self.chat(system, &user).await.map_err(RagError::Generation)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::engine::ScoredPassage;

/// Produces embedding vectors for text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts. The default implementation embeds one at a
    /// time; implementations with a batch endpoint should override it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}

/// Produces a grounded answer from a question and retrieved passages.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, question: &str, passages: &[ScoredPassage]) -> Result<String>;
}

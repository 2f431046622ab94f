//! Trait seams between the orchestrator and its backends.

pub mod ai;
pub mod engine;

pub use ai::{Embedder, Generator};
pub use engine::{RetrievalEngine, ScoredPassage};

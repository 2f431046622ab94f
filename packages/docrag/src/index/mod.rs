//! Chunking and the default in-process retrieval engine.

pub mod chunk;
pub mod vector;

pub use chunk::{chunk_text, MAX_CHUNK_CHARS};
pub use vector::{cosine_similarity, VectorIndex};

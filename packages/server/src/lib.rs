// Documentation RAG - API server
//
// Thin HTTP layer over the docrag pipeline: ingest crawls and indexes
// documentation, query answers questions over the indexed corpus.

pub mod config;
pub mod server;

pub use config::*;

//! Core data types.

pub mod config;
pub mod document;

pub use config::CrawlConfig;
pub use document::{
    CrawlRecord, CrawlReport, Document, DocumentMetadata, SkipReason, SkippedPage,
};

//! Core document and crawl bookkeeping types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance metadata attached to every ingestible document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// URL the content was extracted from.
    pub source: String,

    /// Page title (from `<title>` or the URL's last path segment).
    pub title: String,

    /// Position in crawl discovery order, starting at 1.
    pub page_number: usize,
}

/// A unit of ingestible text plus provenance metadata.
///
/// Produced by the crawler, consumed once by ingestion. Never mutated
/// after creation; the retrieval engine copies what it needs into its
/// own representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted, normalized page text. Always longer than the
    /// extractor's minimum-content threshold.
    pub text: String,

    /// Source, title, and discovery-order page number.
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a new document.
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
        page_number: usize,
    ) -> Self {
        Self {
            text: text.into(),
            metadata: DocumentMetadata {
                source: source.into(),
                title: title.into(),
                page_number,
            },
        }
    }

    /// Character count of the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Per-page bookkeeping entry, 1:1 with ingested documents.
///
/// The ordered sequence of records for a crawl run is the
/// scraped-pages ledger, owned by [`crate::service::RagService`] and
/// reset at the start of every ingestion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    pub title: String,

    /// Character count of the extracted text.
    pub length: usize,

    pub page_number: usize,
}

impl From<&Document> for CrawlRecord {
    fn from(doc: &Document) -> Self {
        Self {
            url: doc.metadata.source.clone(),
            title: doc.metadata.title.clone(),
            length: doc.char_count(),
            page_number: doc.metadata.page_number,
        }
    }
}

/// Why a visited page produced no document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Fetch failed (timeout, non-2xx, network error).
    Fetch { message: String },

    /// No content region matched any selector or the fallback.
    NoContentRegion,

    /// A region was found but its normalized text was at or below the
    /// minimum-content threshold.
    ContentTooShort { chars: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch { message } => write!(f, "fetch failed: {message}"),
            SkipReason::NoContentRegion => write!(f, "no content region found"),
            SkipReason::ContentTooShort { chars } => {
                write!(f, "content too short ({chars} chars)")
            }
        }
    }
}

/// A page that was visited but skipped, with its cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPage {
    pub url: String,
    pub reason: SkipReason,
}

/// Summary of a finished crawl run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    /// URLs dequeued and attempted (bounded by the page budget).
    pub pages_visited: usize,

    /// Documents produced.
    pub documents: usize,

    /// Total characters across produced documents.
    pub total_characters: usize,

    /// Visited pages that produced no document, with causes.
    pub skipped: Vec<SkippedPage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_record_from_document() {
        let doc = Document::new("hello world", "https://example.com/a", "A", 3);
        let record = CrawlRecord::from(&doc);

        assert_eq!(record.url, "https://example.com/a");
        assert_eq!(record.title, "A");
        assert_eq!(record.length, 11);
        assert_eq!(record.page_number, 3);
    }

    #[test]
    fn test_char_count_is_chars_not_bytes() {
        let doc = Document::new("héllo", "https://example.com", "t", 1);
        assert_eq!(doc.char_count(), 5);
        assert!(doc.text.len() > 5);
    }

    #[test]
    fn test_skip_reason_serializes_tagged() {
        let reason = SkipReason::ContentTooShort { chars: 200 };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["reason"], "content_too_short");
        assert_eq!(json["chars"], 200);
    }
}

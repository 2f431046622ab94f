use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use docrag::{CrawlRecord, Document, IngestRequest, RagError};

use crate::server::app::AppState;

#[derive(Deserialize, Default)]
pub struct IngestBody {
    /// Crawl seed. Falls back to the configured default when absent.
    pub url: Option<String>,

    /// Page-budget override for this crawl.
    pub max_pages: Option<usize>,

    /// Pre-extracted documents; skips the crawl entirely.
    pub documents: Option<Vec<Document>>,
}

#[derive(Serialize)]
pub struct IngestResponse {
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_count: Option<usize>,

    /// The scraped-pages ledger for this run. On error it holds what
    /// the crawl managed before the failure.
    pages_scraped: Vec<CrawlRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    total_characters: Option<usize>,
}

/// Crawl (or accept) documents and index them.
///
/// Errors come back as 400 with `status: "error"`; `pages_scraped`
/// still reflects what the crawl managed before the failure.
pub async fn ingest_handler(
    Extension(state): Extension<AppState>,
    body: Option<Json<IngestBody>>,
) -> (StatusCode, Json<IngestResponse>) {
    let Json(body) = body.unwrap_or_default();

    if body.max_pages == Some(0) {
        return (
            StatusCode::BAD_REQUEST,
            Json(IngestResponse {
                status: "error".to_string(),
                message: "max_pages must be greater than zero".to_string(),
                document_count: None,
                pages_scraped: Vec::new(),
                total_characters: None,
            }),
        );
    }

    let request = IngestRequest {
        documents: body.documents,
        url: body.url.or_else(|| state.seed_url.clone()),
        max_pages: body.max_pages,
    };

    match state.service.ingest(request).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(IngestResponse {
                status: "success".to_string(),
                message: format!(
                    "Successfully ingested {} documents",
                    summary.document_count
                ),
                document_count: Some(summary.document_count),
                pages_scraped: state.service.ledger(),
                total_characters: Some(summary.total_characters),
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(IngestResponse {
                status: "error".to_string(),
                message: ingest_error_message(&e),
                document_count: None,
                pages_scraped: state.service.ledger(),
                total_characters: None,
            }),
        ),
    }
}

/// Input errors pass through verbatim; internal failures get a prefix.
fn ingest_error_message(e: &RagError) -> String {
    match e {
        RagError::EmptyInput => e.to_string(),
        _ => format!("Error during ingestion: {e}"),
    }
}

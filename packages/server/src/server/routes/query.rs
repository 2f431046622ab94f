use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use docrag::{RagError, Source};

use crate::server::app::AppState;

const DEFAULT_TOP_K: usize = 3;

#[derive(Deserialize, Default)]
pub struct QueryBody {
    pub question: Option<String>,

    /// Number of passages retrieved as context.
    pub top_k: Option<usize>,
}

#[derive(Serialize)]
pub struct QueryResponse {
    status: String,
    answer: String,
    sources: Vec<Source>,
}

impl QueryResponse {
    fn error(answer: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            answer: answer.into(),
            sources: Vec::new(),
        }
    }
}

/// Answer a question over the ingested corpus.
pub async fn query_handler(
    Extension(state): Extension<AppState>,
    body: Option<Json<QueryBody>>,
) -> (StatusCode, Json<QueryResponse>) {
    let Json(body) = body.unwrap_or_default();

    let question = match body.question.as_deref() {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(QueryResponse::error("Missing 'question' in request body")),
            )
        }
    };

    let top_k = body.top_k.unwrap_or(DEFAULT_TOP_K);
    if top_k == 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(QueryResponse::error("top_k must be greater than zero")),
        );
    }

    match state.service.answer(question, top_k).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(QueryResponse {
                status: "success".to_string(),
                answer: answer.answer,
                sources: answer.sources,
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(QueryResponse::error(query_error_message(&e))),
        ),
    }
}

/// The missing-index error passes through verbatim; internal failures
/// get a prefix.
fn query_error_message(e: &RagError) -> String {
    match e {
        RagError::NoIndex => e.to_string(),
        _ => format!("Error during query: {e}"),
    }
}

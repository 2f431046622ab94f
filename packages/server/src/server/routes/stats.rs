use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};

use docrag::StatsReport;

use crate::server::app::AppState;

/// Index and ledger statistics.
///
/// A missing index is a normal state here, not an error: it reports as
/// 200 with `status: "no_index"`.
pub async fn stats_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<Value>) {
    match state.service.stats().await {
        Ok(StatsReport::NoIndex) => (
            StatusCode::OK,
            Json(json!({
                "status": "no_index",
                "message": "No documents have been ingested yet. Please ingest documents first.",
            })),
        ),
        Ok(StatsReport::Ready {
            document_count,
            vector_count,
            pages,
        }) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "document_count": document_count,
                "vector_count": vector_count,
                "pages": pages,
            })),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "message": format!("Error retrieving stats: {e}"),
            })),
        ),
    }
}

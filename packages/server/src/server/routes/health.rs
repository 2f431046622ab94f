use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    index_ready: bool,
    documents_ingested: usize,
}

/// Health check endpoint
///
/// Always 200: the process being up is the health signal. Index state
/// is informational.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let report = state.service.health();
    Json(HealthResponse {
        status: "healthy".to_string(),
        index_ready: report.index_ready,
        documents_ingested: report.documents,
    })
}

use axum::Json;
use serde_json::{json, Value};

/// Service descriptor for the root path.
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "service": "Documentation RAG API",
        "status": "running",
        "endpoints": {
            "GET /health": "Service liveness and index state",
            "POST /ingest": "Crawl documentation and index it",
            "POST /query": "Ask a question over the indexed docs",
            "GET /stats": "Index and ledger statistics",
        }
    }))
}

//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use docrag::RagService;

use crate::server::routes::{
    health_handler, home_handler, ingest_handler, query_handler, stats_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RagService>,

    /// Default crawl seed when an ingest request names no URL.
    pub seed_url: Option<String>,
}

/// Build the Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/ingest", post(ingest_handler))
        .route("/query", post(query_handler))
        .route("/stats", get(stats_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use docrag::testing::{MockEngine, MockFetcher, MockGenerator};
    use docrag::types::DocumentMetadata;
    use docrag::{CrawlConfig, ScoredPassage};

    fn test_app(engine: MockEngine, fetcher: MockFetcher) -> Router {
        let service = Arc::new(RagService::new(
            Arc::new(engine),
            Arc::new(MockGenerator::new("mock answer")),
            Arc::new(fetcher),
            CrawlConfig::new()
                .with_section_pattern("/docs/")
                .with_politeness_delay_ms(0),
        ));
        build_app(AppState {
            service,
            seed_url: Some("https://docs.example.com/docs/home".to_string()),
        })
    }

    fn passage(text: &str) -> ScoredPassage {
        ScoredPassage {
            text: text.to_string(),
            score: Some(0.8),
            metadata: DocumentMetadata {
                source: "https://docs.example.com/docs/a".to_string(),
                title: "A".to_string(),
                page_number: 1,
            },
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(MockEngine::new(), MockFetcher::new());
        let (status, body) = send(app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["index_ready"], false);
    }

    #[tokio::test]
    async fn test_query_missing_question() {
        let app = test_app(MockEngine::ready(), MockFetcher::new());
        let (status, body) = send(app, post_json("/query", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["answer"], "Missing 'question' in request body");
        assert_eq!(body["sources"], json!([]));
    }

    #[tokio::test]
    async fn test_query_before_ingest() {
        let app = test_app(MockEngine::new(), MockFetcher::new());
        let (status, body) = send(app, post_json("/query", json!({"question": "hi"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["answer"],
            "No documents have been ingested yet. Please ingest documents first."
        );
    }

    #[tokio::test]
    async fn test_query_success() {
        let engine = MockEngine::ready().with_passages(vec![passage("context text")]);
        let app = test_app(engine, MockFetcher::new());
        let (status, body) = send(app, post_json("/query", json!({"question": "hi"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["answer"], "mock answer");
        assert_eq!(body["sources"][0]["text"], "context text");
        assert_eq!(
            body["sources"][0]["metadata"]["source"],
            "https://docs.example.com/docs/a"
        );
        assert_eq!(body["sources"][0]["metadata"]["page_number"], 1);
    }

    #[tokio::test]
    async fn test_ingest_uses_default_seed() {
        let fetcher = MockFetcher::new().with_page(
            "https://docs.example.com/docs/home",
            format!(
                "<html><body><article><p>{}</p></article></body></html>",
                "x".repeat(400)
            ),
        );
        let app = test_app(MockEngine::new(), fetcher);
        // Empty body: the configured seed URL drives the crawl.
        let (status, body) = send(app, post_json("/ingest", json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Successfully ingested 1 documents");
        assert_eq!(body["document_count"], 1);
        assert_eq!(body["total_characters"], 400);

        // pages_scraped is the ledger itself, not a count.
        let pages = body["pages_scraped"].as_array().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["url"], "https://docs.example.com/docs/home");
        assert_eq!(pages[0]["page_number"], 1);
        assert_eq!(pages[0]["length"], 400);
    }

    #[tokio::test]
    async fn test_ingest_rejects_zero_max_pages() {
        let app = test_app(MockEngine::new(), MockFetcher::new());
        let (status, body) = send(app, post_json("/ingest", json!({"max_pages": 0}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_ingest_crawl_with_no_documents() {
        // Seed 404s: nothing scraped, nothing indexed.
        let app = test_app(MockEngine::new(), MockFetcher::new());
        let (status, body) = send(app, post_json("/ingest", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No documents provided or scraped");
        assert_eq!(body["pages_scraped"], json!([]));
    }

    #[tokio::test]
    async fn test_ingest_error_reports_partial_ledger() {
        let fetcher = MockFetcher::new().with_page(
            "https://docs.example.com/docs/home",
            format!(
                "<html><body><article><p>{}</p></article></body></html>",
                "x".repeat(400)
            ),
        );
        let service = Arc::new(RagService::new(
            Arc::new(docrag::testing::FailingEngine),
            Arc::new(MockGenerator::new("mock answer")),
            Arc::new(fetcher),
            CrawlConfig::new()
                .with_section_pattern("/docs/")
                .with_politeness_delay_ms(0),
        ));
        let app = build_app(AppState {
            service,
            seed_url: Some("https://docs.example.com/docs/home".to_string()),
        });

        let (status, body) = send(app, post_json("/ingest", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        // The crawl finished before the engine failed, so the ledger
        // still lists what was scraped.
        let pages = body["pages_scraped"].as_array().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["url"], "https://docs.example.com/docs/home");
    }

    #[tokio::test]
    async fn test_stats_no_index() {
        let app = test_app(MockEngine::new(), MockFetcher::new());
        let (status, body) = send(app, get("/stats")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_index");
    }

    #[tokio::test]
    async fn test_stats_after_ingest() {
        let fetcher = MockFetcher::new().with_page(
            "https://docs.example.com/docs/home",
            format!(
                "<html><head><title>Home</title></head><body><article><p>{}</p></article></body></html>",
                "x".repeat(400)
            ),
        );
        let app = test_app(MockEngine::new(), fetcher);

        let (status, _) = send(app.clone(), post_json("/ingest", json!({}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, get("/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["document_count"], 1);
        assert_eq!(body["pages"][0]["url"], "https://docs.example.com/docs/home");
    }

    #[tokio::test]
    async fn test_home_lists_endpoints() {
        let app = test_app(MockEngine::new(), MockFetcher::new());
        let (status, body) = send(app, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert!(body["endpoints"].is_object());
    }
}

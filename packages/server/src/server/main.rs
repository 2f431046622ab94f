// Main entry point for the documentation RAG API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docrag::ai::OpenAi;
use docrag::index::VectorIndex;
use docrag::{CrawlConfig, HttpFetcher, RagService, RetrievalEngine};
use server_core::server::{build_app, AppState};
use server_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,docrag=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Documentation RAG API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Model client serves both embedding and generation
    let openai = OpenAi::new(config.openai_api_key.clone());

    let engine = Arc::new(VectorIndex::with_snapshot(
        openai.clone(),
        &config.index_path,
    ));
    if engine.is_ready() {
        tracing::info!(path = %config.index_path, "restored vector index from snapshot");
    }

    let crawl_config = CrawlConfig::new().with_section_pattern(&config.section_pattern);
    let fetcher = Arc::new(
        HttpFetcher::new(Duration::from_secs(crawl_config.fetch_timeout_secs))
            .context("Failed to build HTTP client")?,
    );

    let service = Arc::new(RagService::new(
        engine,
        Arc::new(openai),
        fetcher,
        crawl_config,
    ));

    let app = build_app(AppState {
        service,
        seed_url: config.seed_url.clone(),
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

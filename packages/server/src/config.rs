use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub index_path: String,
    pub seed_url: Option<String>,
    pub section_pattern: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            index_path: env::var("INDEX_PATH")
                .unwrap_or_else(|_| "./vector_index.json".to_string()),
            seed_url: env::var("SEED_URL").ok(),
            section_pattern: env::var("SECTION_PATTERN")
                .unwrap_or_else(|_| "/langgraph/".to_string()),
        })
    }
}

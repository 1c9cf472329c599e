use anyhow::{anyhow, Context, Result};

use crate::profile::DateStrategy;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: String,
    pub date_strategy: DateStrategy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("PROSKAI_API_BASE_URL")?,
            session_file: std::env::var("PROSKAI_SESSION_FILE")
                .unwrap_or_else(|_| "session.json".to_string()),
            date_strategy: match std::env::var("PROSKAI_DATE_STRATEGY") {
                Ok(raw) => raw
                    .parse::<DateStrategy>()
                    .map_err(|e: String| anyhow!(e))
                    .context("PROSKAI_DATE_STRATEGY is invalid")?,
                Err(_) => DateStrategy::default(),
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

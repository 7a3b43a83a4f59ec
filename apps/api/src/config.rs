use anyhow::{Context, Result};

use crate::generation::prompts::PromptMode;

/// Which Cohere API surface the service talks to.
/// `V2` is the current chat endpoint; `Legacy` is the pre-v2 contract kept
/// as an alternate adapter for older deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    V2,
    Legacy,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing — the API key is
/// never compiled into the binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub cohere_api_key: String,
    pub api_flavor: ApiFlavor,
    pub prompt_mode: PromptMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_flavor = match std::env::var("COHERE_API_FLAVOR")
            .unwrap_or_else(|_| "v2".to_string())
            .as_str()
        {
            "v2" => ApiFlavor::V2,
            "legacy" => ApiFlavor::Legacy,
            other => anyhow::bail!("COHERE_API_FLAVOR must be 'v2' or 'legacy', got '{other}'"),
        };

        let prompt_mode = std::env::var("BIO_PROMPT_MODE")
            .unwrap_or_else(|_| "detailed".to_string())
            .parse::<PromptMode>()
            .context("BIO_PROMPT_MODE must be 'detailed' or 'short'")?;

        Ok(Config {
            cohere_api_key: require_env("COHERE_API_KEY")?,
            api_flavor,
            prompt_mode,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

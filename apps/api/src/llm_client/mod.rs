//! LLM Client — the single point of entry for all Cohere API calls in Biograph.
//!
//! ARCHITECTURAL RULE: No other module may call the Cohere API directly.
//! All LLM interactions MUST go through a `ChatProvider` from this module.
//!
//! Two adapters exist because the Cohere contract drifted: `CohereClient`
//! speaks the current v2 chat endpoint, `CohereLegacyClient` the pre-v2 one.
//! Exactly one is selected at startup via `COHERE_API_FLAVOR`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const COHERE_V2_URL: &str = "https://api.cohere.com/v2/chat";
const COHERE_LEGACY_URL: &str = "https://api.cohere.ai/v1/chat";

/// Models are intentionally hardcoded per adapter to prevent accidental drift.
pub const V2_MODEL: &str = "command-a-03-2025";
pub const LEGACY_MODEL: &str = "command-r-plus";

/// Substituted when the v2 response carries no text block.
pub const V2_NO_TEXT_FALLBACK: &str = "No AI text returned";
/// Substituted when the legacy response carries neither `output` nor `text`.
pub const LEGACY_NO_TEXT_FALLBACK: &str = "No response";

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request cancelled")]
    Cancelled,
}

/// The adapter seam for chat-completion providers.
///
/// `chat` issues exactly one upstream call: no retries, no caching, no
/// streaming. A triggered `cancel` token aborts the in-flight request and
/// surfaces `LlmError::Cancelled` to the caller.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, LlmError>;
}

fn build_http_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}

/// Reads the body of a non-success response into an `Api` error.
/// Status is checked BEFORE any JSON decoding so upstream failures surface
/// as error strings rather than parse errors.
async fn error_from_response(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    LlmError::Api { status, message }
}

// ────────────────────────────────────────────────────────────────────────────
// Cohere v2 chat adapter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct V2ChatRequest<'a> {
    stream: bool,
    model: &'a str,
    messages: Vec<V2ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct V2ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct V2ChatResponse {
    #[serde(default)]
    pub message: Option<V2AssistantMessage>,
}

#[derive(Debug, Deserialize)]
pub struct V2AssistantMessage {
    #[serde(default)]
    pub content: Vec<V2ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct V2ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl V2ChatResponse {
    /// Extracts the generated text from `message.content[0].text`.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_ref()?
            .content
            .first()?
            .text
            .as_deref()
    }
}

/// Client for the current Cohere v2 chat endpoint.
#[derive(Clone)]
pub struct CohereClient {
    client: Client,
    api_key: String,
    url: String,
}

impl CohereClient {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, COHERE_V2_URL.to_string())
    }

    /// Same client pointed at a different base URL. Used by tests.
    pub fn with_url(api_key: String, url: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
            url,
        }
    }

    async fn chat_inner(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = V2ChatRequest {
            stream: false,
            model: V2_MODEL,
            messages: vec![V2ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: V2ChatResponse = response.json().await?;

        debug!("v2 chat call succeeded (model: {V2_MODEL})");

        Ok(parsed.text().unwrap_or(V2_NO_TEXT_FALLBACK).to_string())
    }
}

#[async_trait]
impl ChatProvider for CohereClient {
    async fn chat(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, LlmError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LlmError::Cancelled),
            result = self.chat_inner(prompt) => result,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cohere legacy chat adapter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct LegacyChatRequest<'a> {
    model: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LegacyChatResponse {
    #[serde(default)]
    pub output: Vec<LegacyOutputBlock>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyOutputBlock {
    #[serde(default)]
    pub content: Option<String>,
}

impl LegacyChatResponse {
    /// Extracts `output[0].content`, falling back to the top-level `text`.
    pub fn text(&self) -> Option<&str> {
        self.output
            .first()
            .and_then(|b| b.content.as_deref())
            .or(self.text.as_deref())
    }
}

/// Client for the pre-v2 Cohere chat endpoint. Kept as an alternate adapter
/// for deployments still pinned to the old contract.
#[derive(Clone)]
pub struct CohereLegacyClient {
    client: Client,
    api_key: String,
    url: String,
}

impl CohereLegacyClient {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, COHERE_LEGACY_URL.to_string())
    }

    pub fn with_url(api_key: String, url: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
            url,
        }
    }

    async fn chat_inner(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = LegacyChatRequest {
            model: LEGACY_MODEL,
            message: prompt,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: LegacyChatResponse = response.json().await?;

        debug!("legacy chat call succeeded (model: {LEGACY_MODEL})");

        Ok(parsed.text().unwrap_or(LEGACY_NO_TEXT_FALLBACK).to_string())
    }
}

#[async_trait]
impl ChatProvider for CohereLegacyClient {
    async fn chat(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, LlmError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LlmError::Cancelled),
            result = self.chat_inner(prompt) => result,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_v2_response_extracts_first_text_block() {
        let response: V2ChatResponse = serde_json::from_value(json!({
            "message": {
                "content": [
                    { "type": "text", "text": "Jane is an engineer." }
                ]
            }
        }))
        .unwrap();
        assert_eq!(response.text(), Some("Jane is an engineer."));
    }

    #[test]
    fn test_v2_response_missing_message_yields_none() {
        let response: V2ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_v2_response_empty_content_yields_none() {
        let response: V2ChatResponse = serde_json::from_value(json!({
            "message": { "content": [] }
        }))
        .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_legacy_response_prefers_output_content() {
        let response: LegacyChatResponse = serde_json::from_value(json!({
            "output": [{ "content": "From output" }],
            "text": "From text"
        }))
        .unwrap();
        assert_eq!(response.text(), Some("From output"));
    }

    #[test]
    fn test_legacy_response_falls_back_to_text_field() {
        let response: LegacyChatResponse = serde_json::from_value(json!({
            "text": "From text"
        }))
        .unwrap();
        assert_eq!(response.text(), Some("From text"));
    }

    #[test]
    fn test_legacy_response_missing_both_yields_none() {
        let response: LegacyChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_v2_chat_cancelled_before_send_returns_cancelled() {
        // The token is cancelled up front, so the biased select must resolve
        // to Cancelled without ever touching the (unroutable) endpoint.
        let client = CohereClient::with_url(
            "test-key".to_string(),
            "http://127.0.0.1:9/v2/chat".to_string(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.chat("prompt", &cancel).await;
        assert!(matches!(result, Err(LlmError::Cancelled)));
    }

    #[tokio::test]
    async fn test_legacy_chat_cancelled_before_send_returns_cancelled() {
        let client = CohereLegacyClient::with_url(
            "test-key".to_string(),
            "http://127.0.0.1:9/v1/chat".to_string(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.chat("prompt", &cancel).await;
        assert!(matches!(result, Err(LlmError::Cancelled)));
    }
}

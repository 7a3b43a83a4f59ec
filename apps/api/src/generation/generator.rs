//! Bio generation — orchestrates the pipeline for one request.
//!
//! Flow: build_prompt → ChatProvider::chat → format_ai_content.
//!
//! Stateless request/response: no global state, no persistence, exactly one
//! upstream call per invocation. A cancelled token surfaces as an error to
//! the caller rather than partial content.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::errors::AppError;
use crate::generation::formatter::format_ai_content;
use crate::generation::prompts::{build_prompt, PromptMode};
use crate::llm_client::ChatProvider;
use crate::models::bio::BioFormData;

/// Runs one generation pass and returns the formatted HTML.
pub async fn generate_bio(
    chat: &dyn ChatProvider,
    form: &BioFormData,
    mode: PromptMode,
    cancel: &CancellationToken,
) -> Result<String, AppError> {
    let prompt = build_prompt(form, mode);

    info!("Generating bio for '{}' (mode: {mode:?})", form.fullname);

    let raw = chat.chat(&prompt, cancel).await?;

    Ok(format_ai_content(&raw))
}

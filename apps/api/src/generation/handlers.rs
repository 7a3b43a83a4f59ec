//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::generate_bio;
use crate::generation::prompts::PromptMode;
use crate::models::bio::BioFormData;
use crate::state::AppState;

/// Request body for bio generation: the six form fields flat, plus an
/// optional verbosity override.
#[derive(Debug, Deserialize)]
pub struct GenerateBioRequest {
    #[serde(flatten)]
    pub form: BioFormData,
    pub mode: Option<PromptMode>,
}

#[derive(Debug, Serialize)]
pub struct GenerateBioResponse {
    pub output: String,
}

/// POST /api/v1/bios/generate
///
/// Builds the prompt, calls the configured chat provider once, and returns
/// the formatted HTML as `{ "output": … }`. The process shutdown token is
/// threaded through so an in-flight upstream call aborts on shutdown.
pub async fn handle_generate_bio(
    State(state): State<AppState>,
    Json(request): Json<GenerateBioRequest>,
) -> Result<Json<GenerateBioResponse>, AppError> {
    let mode = request.mode.unwrap_or(state.config.prompt_mode);

    let output = generate_bio(
        state.chat.as_ref(),
        &request.form,
        mode,
        &state.shutdown,
    )
    .await?;

    Ok(Json(GenerateBioResponse { output }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_flat_form_fields() {
        let request: GenerateBioRequest = serde_json::from_value(serde_json::json!({
            "fullname": "Jane Doe",
            "title": "Engineer",
            "company": "Acme Corp",
            "tags": "Rust",
            "tone": "warm",
            "goal": "mentor",
        }))
        .unwrap();

        assert_eq!(request.form.fullname, "Jane Doe");
        assert!(request.mode.is_none());
    }

    #[test]
    fn test_request_accepts_mode_override() {
        let request: GenerateBioRequest = serde_json::from_value(serde_json::json!({
            "fullname": "Jane Doe",
            "title": "Engineer",
            "company": "Acme Corp",
            "tags": "Rust",
            "tone": "warm",
            "goal": "mentor",
            "mode": "short",
        }))
        .unwrap();

        assert_eq!(request.mode, Some(PromptMode::Short));
    }
}

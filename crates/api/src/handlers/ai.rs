//! Handlers for AI-assisted email composition.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Instruction applied when the caller does not supply one.
const DEFAULT_IMPROVE_INSTRUCTION: &str =
    "Improve the clarity, tone and persuasiveness of this email.";

#[derive(Debug, Deserialize)]
pub struct GenerateEmailRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ImproveContentRequest {
    #[serde(default)]
    pub content: String,
    pub instruction: Option<String>,
}

/// POST /api/ai/generate-email
///
/// Generates a subject/content pair from a free-form prompt.
pub async fn generate_email(
    State(state): State<AppState>,
    Json(req): Json<GenerateEmailRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if req.prompt.is_empty() {
        return Err(AppError::BadRequest("prompt is required".to_string()));
    }

    let ai = state.ai()?;
    let email = ai.generate_email(&req.prompt).await?;

    Ok(Json(json!({
        "subject": email.subject,
        "content": email.content,
    })))
}

/// POST /api/ai/improve-content
///
/// Applies an instruction to existing email HTML and returns the cleaned
/// result.
pub async fn improve_content(
    State(state): State<AppState>,
    Json(req): Json<ImproveContentRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if req.content.is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()));
    }

    let ai = state.ai()?;
    let improved = ai
        .improve_content(
            &req.content,
            req.instruction
                .as_deref()
                .unwrap_or(DEFAULT_IMPROVE_INSTRUCTION),
        )
        .await?;

    Ok(Json(json!({ "improvedContent": improved })))
}

//! Handler for sending a fully composed email.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /api/send-email`: the caller supplies the full
/// subject and HTML body (typically pre-rendered by the frontend).
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
}

/// POST /api/send-email
pub async fn send_email(
    State(state): State<AppState>,
    Json(req): Json<SendEmailRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if req.to.is_empty() || req.subject.is_empty() || req.html.is_empty() {
        return Err(AppError::BadRequest(
            "to, subject and html are required".to_string(),
        ));
    }

    let mailer = state.mailer()?;
    mailer.send(&req.to, &req.subject, &req.html).await?;

    Ok(Json(json!({ "message": "Email sent successfully" })))
}

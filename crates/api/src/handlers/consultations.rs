//! Handlers for the `/consultations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use outreach_db::models::consultation::{Consultation, NewConsultation};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/consultations
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Consultation>>> {
    Ok(Json(state.consultations.list().await?))
}

/// POST /api/consultations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewConsultation>,
) -> AppResult<(StatusCode, Json<Consultation>)> {
    if input.client_name.is_empty() {
        return Err(AppError::BadRequest("clientName is required".to_string()));
    }
    let consultation = state.consultations.create(input).await?;
    Ok((StatusCode::CREATED, Json(consultation)))
}

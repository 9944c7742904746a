//! Handlers for the `/templates` resource, including render-and-send.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use outreach_core::error::CoreError;
use outreach_core::types::DbId;
use outreach_db::models::template::{NewTemplate, Template, UpdateTemplate};

use crate::error::{AppError, AppResult};
use crate::send::{send_from_template, SendTemplateRequest};
use crate::state::AppState;

/// GET /api/templates
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Template>>> {
    Ok(Json(state.templates.list().await?))
}

/// POST /api/templates
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewTemplate>,
) -> AppResult<(StatusCode, Json<Template>)> {
    if input.name.is_empty() || input.subject.is_empty() || input.content.is_empty() {
        return Err(AppError::BadRequest(
            "name, subject and content are required".to_string(),
        ));
    }
    let template = state.templates.create(input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/templates/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Template>> {
    let template = state.templates.get(id).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Template",
            id,
        },
    ))?;
    Ok(Json(template))
}

/// PUT /api/templates/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<Template>> {
    let template = state.templates.update(id, input).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Template",
            id,
        },
    ))?;
    Ok(Json(template))
}

/// DELETE /api/templates/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.templates.delete(id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/templates/send
///
/// Renders a stored template and/or caller-supplied overrides and hands
/// the result to the email transport.
pub async fn send(
    State(state): State<AppState>,
    Json(req): Json<SendTemplateRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let mailer = state.mailer()?;
    send_from_template(state.templates.as_ref(), mailer.as_ref(), req).await?;
    Ok(Json(json!({ "message": "Email sent successfully" })))
}

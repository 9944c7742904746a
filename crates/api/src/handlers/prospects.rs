//! Handlers for the `/prospects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use outreach_core::error::CoreError;
use outreach_core::types::DbId;
use outreach_db::models::prospect::{NewProspect, Prospect, UpdateProspect};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/prospects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Prospect>>> {
    Ok(Json(state.prospects.list().await?))
}

/// POST /api/prospects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProspect>,
) -> AppResult<(StatusCode, Json<Prospect>)> {
    if input.name.is_empty() || input.email.is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }
    let prospect = state.prospects.create(input).await?;
    Ok((StatusCode::CREATED, Json(prospect)))
}

/// GET /api/prospects/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Prospect>> {
    let prospect = state.prospects.get(id).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Prospect",
            id,
        },
    ))?;
    Ok(Json(prospect))
}

/// PUT /api/prospects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProspect>,
) -> AppResult<Json<Prospect>> {
    let prospect = state.prospects.update(id, input).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Prospect",
            id,
        },
    ))?;
    Ok(Json(prospect))
}

/// DELETE /api/prospects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.prospects.delete(id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Prospect",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Present only in the Postgres-backed variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    db_healthy: Option<bool>,
}

/// GET /health
///
/// Liveness probe. When the Postgres variant is active, also reports
/// whether the database answers a trivial query.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match &state.pool {
        Some(pool) => Some(outreach_db::health_check(pool).await.is_ok()),
        None => None,
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

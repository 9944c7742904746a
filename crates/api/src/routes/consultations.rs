//! Route definitions for the `/consultations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::consultations;
use crate::state::AppState;

/// Routes mounted at `/consultations`.
///
/// ```text
/// GET  /   -> list
/// POST /   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(consultations::list).post(consultations::create))
}

//! Route definitions.

pub mod ai;
pub mod consultations;
pub mod health;
pub mod prospects;
pub mod templates;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /prospects                GET list, POST create
/// /prospects/{id}           GET, PUT, DELETE
/// /consultations            GET list, POST create
/// /templates                GET list, POST create
/// /templates/send           POST render-and-send
/// /templates/{id}           GET, PUT, DELETE
/// /ai/generate-email        POST
/// /ai/improve-content       POST
/// /chat                     POST (SSE stream)
/// /send-email               POST
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/prospects", prospects::router())
        .nest("/consultations", consultations::router())
        .nest("/templates", templates::router())
        .nest("/ai", ai::router())
        .route("/chat", post(handlers::chat::chat))
        .route("/send-email", post(handlers::email::send_email))
}

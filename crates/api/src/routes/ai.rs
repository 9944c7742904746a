//! Route definitions for the `/ai` composition endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /generate-email    -> generate a subject/content pair
/// POST /improve-content   -> improve existing HTML
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-email", post(ai::generate_email))
        .route("/improve-content", post(ai::improve_content))
}

//! Route definitions for the `/templates` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// POST   /send   -> render and dispatch
/// GET    /{id}   -> get
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list).post(templates::create))
        .route("/send", post(templates::send))
        .route(
            "/{id}",
            get(templates::get)
                .put(templates::update)
                .delete(templates::delete),
        )
}

//! Route definitions for the `/prospects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::prospects;
use crate::state::AppState;

/// Routes mounted at `/prospects`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prospects::list).post(prospects::create))
        .route(
            "/{id}",
            get(prospects::get)
                .put(prospects::update)
                .delete(prospects::delete),
        )
}

//! Route definitions for the `/makeups` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::makeup;
use crate::state::AppState;

/// Routes mounted at `/makeups`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(makeup::list).post(makeup::create))
        .route(
            "/{id}",
            get(makeup::get_by_id)
                .put(makeup::replace)
                .patch(makeup::update)
                .delete(makeup::delete),
        )
}

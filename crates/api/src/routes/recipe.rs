//! Route definitions for the `/recipes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recipe;
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> replace
/// PATCH  /{id}                -> update
/// DELETE /{id}                -> delete
/// POST   /{id}/upload-image   -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipe::list).post(recipe::create))
        .route(
            "/{id}",
            get(recipe::get_by_id)
                .put(recipe::replace)
                .patch(recipe::update)
                .delete(recipe::delete),
        )
        .route("/{id}/upload-image", post(recipe::upload_image))
}

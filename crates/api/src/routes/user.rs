//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST   /create    -> create (public)
/// POST   /token     -> token (public)
/// GET    /me        -> me
/// PUT    /me        -> replace_me
/// PATCH  /me        -> patch_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(user::create))
        .route("/token", post(user::token))
        .route(
            "/me",
            get(user::me).put(user::replace_me).patch(user::patch_me),
        )
}

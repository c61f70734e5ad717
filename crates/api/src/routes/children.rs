//! Route definitions for the owner-scoped child collections.
//!
//! Tags, ingredients and characters share one set of handlers; each router
//! layers the [`ChildKind`] it serves as a request extension.

use axum::routing::{get, put};
use axum::{Extension, Router};
use trove_db::models::child::{ChildKind, CHARACTERS, INGREDIENTS, TAGS};

use crate::handlers::child;
use crate::state::AppState;

/// List, rename and delete. Tags and ingredients are only created inline
/// through a recipe payload.
fn attached_only(kind: ChildKind) -> Router<AppState> {
    Router::new()
        .route("/", get(child::list))
        .route(
            "/{id}",
            put(child::replace)
                .patch(child::update)
                .delete(child::delete),
        )
        .layer(Extension(kind))
}

/// Routes mounted at `/tags`.
///
/// ```text
/// GET    /        -> list (?assigned_only)
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn tags_router() -> Router<AppState> {
    attached_only(TAGS)
}

/// Routes mounted at `/ingredients`, same shape as `/tags`.
pub fn ingredients_router() -> Router<AppState> {
    attached_only(INGREDIENTS)
}

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /        -> list (?assigned_only)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn characters_router() -> Router<AppState> {
    Router::new()
        .route("/", get(child::list).post(child::create))
        .route(
            "/{id}",
            get(child::get_by_id)
                .put(child::replace)
                .patch(child::update)
                .delete(child::delete),
        )
        .layer(Extension(CHARACTERS))
}

pub mod children;
pub mod health;
pub mod makeup;
pub mod movie;
pub mod recipe;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/create                                     register (public)
/// /user/token                                      obtain token (public)
/// /user/me                                         get, put, patch
///
/// /recipes                                         list (?tags, ?ingredients), create
/// /recipes/{id}                                    get, put, patch, delete
/// /recipes/{id}/upload-image                       upload image (multipart)
///
/// /tags                                            list (?assigned_only)
/// /tags/{id}                                       put, patch, delete
/// /ingredients                                     list (?assigned_only)
/// /ingredients/{id}                                put, patch, delete
///
/// /movies                                          list, create
/// /movies/{id}                                     get, put, patch, delete
/// /characters                                      list (?assigned_only), create
/// /characters/{id}                                 get, put, patch, delete
///
/// /makeups                                         list, create
/// /makeups/{id}                                    get, put, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, token exchange, own profile.
        .nest("/user", user::router())
        // Recipes with inline tags and ingredients.
        .nest("/recipes", recipe::router())
        .nest("/tags", children::tags_router())
        .nest("/ingredients", children::ingredients_router())
        // Movies with inline characters.
        .nest("/movies", movie::router())
        .nest("/characters", children::characters_router())
        .nest("/makeups", makeup::router())
}

//! Handlers for the `/movies` resource. Characters are written inline
//! through the movie payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use trove_core::error::CoreError;
use trove_core::types::DbId;
use trove_db::models::movie::{CreateMovie, MovieResponse, UpdateMovie};
use trove_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

/// GET /api/v1/movies
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let movies = MovieRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(MovieRepo::responses(&state.pool, movies).await?))
}

/// POST /api/v1/movies
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMovie>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    input.check()?;
    let movie = MovieRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(id = movie.id, user_id = auth.user_id, "Movie created");
    let response = MovieRepo::response(&state.pool, movie).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MovieResponse>> {
    let movie = MovieRepo::find_for_owner(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(MovieRepo::response(&state.pool, movie).await?))
}

/// PUT /api/v1/movies/{id}
pub async fn replace(
    auth: AuthUser,
    state: State<AppState>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<CreateMovie>,
) -> AppResult<Json<MovieResponse>> {
    apply_update(auth, state, id, UpdateMovie::from(input)).await
}

/// PATCH /api/v1/movies/{id}
pub async fn update(
    auth: AuthUser,
    state: State<AppState>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<UpdateMovie>,
) -> AppResult<Json<MovieResponse>> {
    apply_update(auth, state, id, input).await
}

async fn apply_update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: UpdateMovie,
) -> AppResult<Json<MovieResponse>> {
    input.check()?;
    let movie = MovieRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, user_id = auth.user_id, "Movie updated");
    Ok(Json(MovieRepo::response(&state.pool, movie).await?))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MovieRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(id, user_id = auth.user_id, "Movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

//! Handlers for the `/makeups` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use trove_core::error::CoreError;
use trove_core::types::DbId;
use trove_core::validation::validate;
use trove_db::models::makeup::{CreateMakeup, Makeup, UpdateMakeup};
use trove_db::repositories::MakeupRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Makeup",
        id,
    })
}

/// GET /api/v1/makeups
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Makeup>>> {
    let makeups = MakeupRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(makeups))
}

/// POST /api/v1/makeups
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMakeup>,
) -> AppResult<(StatusCode, Json<Makeup>)> {
    validate(&input)?;
    let makeup = MakeupRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(id = makeup.id, user_id = auth.user_id, "Makeup created");
    Ok((StatusCode::CREATED, Json(makeup)))
}

/// GET /api/v1/makeups/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Makeup>> {
    let makeup = MakeupRepo::find_for_owner(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(makeup))
}

/// PUT /api/v1/makeups/{id}
pub async fn replace(
    auth: AuthUser,
    state: State<AppState>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<CreateMakeup>,
) -> AppResult<Json<Makeup>> {
    apply_update(auth, state, id, UpdateMakeup::from(input)).await
}

/// PATCH /api/v1/makeups/{id}
pub async fn update(
    auth: AuthUser,
    state: State<AppState>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<UpdateMakeup>,
) -> AppResult<Json<Makeup>> {
    apply_update(auth, state, id, input).await
}

async fn apply_update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: UpdateMakeup,
) -> AppResult<Json<Makeup>> {
    validate(&input)?;
    let makeup = MakeupRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, user_id = auth.user_id, "Makeup updated");
    Ok(Json(makeup))
}

/// DELETE /api/v1/makeups/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MakeupRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(id, user_id = auth.user_id, "Makeup deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

//! Handlers shared by `/tags`, `/ingredients` and `/characters`.
//!
//! Each route group injects its [`ChildKind`] as an `Extension`, so one set
//! of handlers serves all three collections.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use trove_core::child_set::validate_name;
use trove_core::error::CoreError;
use trove_core::types::DbId;
use trove_db::models::child::{ChildInfo, ChildKind, CreateChild, UpdateChild};
use trove_db::repositories::ChildRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::query::AssignedOnlyParams;
use crate::state::AppState;

fn not_found(kind: ChildKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.entity,
        id,
    })
}

/// GET /api/v1/{tags,ingredients,characters}
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<ChildKind>,
    Query(params): Query<AssignedOnlyParams>,
) -> AppResult<Json<Vec<ChildInfo>>> {
    let assigned_only = params.assigned_only()?;
    let children = ChildRepo::list_for_owner(&state.pool, kind, auth.user_id, assigned_only).await?;
    Ok(Json(children))
}

/// POST /api/v1/characters
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<ChildKind>,
    JsonBody(input): JsonBody<CreateChild>,
) -> AppResult<(StatusCode, Json<ChildInfo>)> {
    let name = validate_name(&input.name)?;
    let child = ChildRepo::create(&state.pool, kind, auth.user_id, name).await?;
    tracing::info!(entity = kind.entity, id = child.id, user_id = auth.user_id, "Child created");
    Ok((StatusCode::CREATED, Json(child)))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<ChildKind>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ChildInfo>> {
    let child = ChildRepo::find_for_owner(&state.pool, kind, auth.user_id, id)
        .await?
        .ok_or_else(|| not_found(kind, id))?;
    Ok(Json(child))
}

/// PUT /api/v1/{tags,ingredients,characters}/{id}
pub async fn replace(
    auth: AuthUser,
    state: State<AppState>,
    kind: Extension<ChildKind>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<CreateChild>,
) -> AppResult<Json<ChildInfo>> {
    let input = UpdateChild {
        name: Some(input.name),
    };
    rename(auth, state, kind, id, input).await
}

/// PATCH /api/v1/{tags,ingredients,characters}/{id}
pub async fn update(
    auth: AuthUser,
    state: State<AppState>,
    kind: Extension<ChildKind>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<UpdateChild>,
) -> AppResult<Json<ChildInfo>> {
    rename(auth, state, kind, id, input).await
}

async fn rename(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<ChildKind>,
    Path(id): Path<DbId>,
    input: UpdateChild,
) -> AppResult<Json<ChildInfo>> {
    let name = input.name.as_deref().map(validate_name).transpose()?;
    let child = ChildRepo::rename(&state.pool, kind, auth.user_id, id, name)
        .await?
        .ok_or_else(|| not_found(kind, id))?;
    tracing::info!(entity = kind.entity, id, user_id = auth.user_id, "Child updated");
    Ok(Json(child))
}

/// DELETE /api/v1/{tags,ingredients,characters}/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<ChildKind>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ChildRepo::delete(&state.pool, kind, auth.user_id, id).await? {
        tracing::info!(entity = kind.entity, id, user_id = auth.user_id, "Child deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(kind, id))
    }
}

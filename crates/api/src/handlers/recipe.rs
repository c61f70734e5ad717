//! Handlers for the `/recipes` resource.
//!
//! Tags and ingredients are written inline through the recipe payload; the
//! repository reconciles them inside the recipe's transaction.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use trove_core::error::CoreError;
use trove_core::types::DbId;
use trove_core::upload::{inspect_image, recipe_image_path};
use trove_db::models::recipe::{
    CreateRecipe, Recipe, RecipeDetail, RecipeImage, RecipeSummary, ReplaceRecipe,
    UpdateRecipe,
};
use trove_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::media::{self, media_url};
use crate::middleware::auth::AuthUser;
use crate::query::RecipeListParams;
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id,
    })
}

async fn load_detail(state: &AppState, recipe: Recipe) -> AppResult<Json<RecipeDetail>> {
    let mut detail = RecipeRepo::detail(&state.pool, recipe).await?;
    detail.image = detail.image.as_deref().map(media_url);
    Ok(Json(detail))
}

/// GET /api/v1/recipes
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<Json<Vec<RecipeSummary>>> {
    let filter = params.to_filter()?;
    let recipes = RecipeRepo::list_for_owner(&state.pool, auth.user_id, &filter).await?;
    let summaries = RecipeRepo::summaries(&state.pool, &recipes).await?;
    Ok(Json(summaries))
}

/// POST /api/v1/recipes
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateRecipe>,
) -> AppResult<(StatusCode, Json<RecipeDetail>)> {
    input.check()?;
    let recipe = RecipeRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(id = recipe.id, user_id = auth.user_id, "Recipe created");
    let detail = load_detail(&state, recipe).await?;
    Ok((StatusCode::CREATED, detail))
}

/// GET /api/v1/recipes/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RecipeDetail>> {
    let recipe = RecipeRepo::find_for_owner(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    load_detail(&state, recipe).await
}

/// PUT /api/v1/recipes/{id}
///
/// `title`, `time_minutes` and `price` are required. Omitted `link`,
/// `description`, `tags` and `ingredients` keep their stored values.
pub async fn replace(
    auth: AuthUser,
    state: State<AppState>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<ReplaceRecipe>,
) -> AppResult<Json<RecipeDetail>> {
    apply_update(auth, state, id, UpdateRecipe::from(input)).await
}

/// PATCH /api/v1/recipes/{id}
pub async fn update(
    auth: AuthUser,
    state: State<AppState>,
    id: Path<DbId>,
    JsonBody(input): JsonBody<UpdateRecipe>,
) -> AppResult<Json<RecipeDetail>> {
    apply_update(auth, state, id, input).await
}

async fn apply_update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: UpdateRecipe,
) -> AppResult<Json<RecipeDetail>> {
    input.check()?;
    let recipe = RecipeRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, user_id = auth.user_id, "Recipe updated");
    load_detail(&state, recipe).await
}

/// DELETE /api/v1/recipes/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RecipeRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(id, user_id = auth.user_id, "Recipe deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/recipes/{id}/upload-image
///
/// Accepts a multipart body with an `image` field. The bytes must sniff as
/// JPEG, PNG or WebP; they are stored under a fresh UUID file name.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<RecipeImage>> {
    RecipeRepo::find_for_owner(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?,
            );
            break;
        }
    }
    let bytes = bytes.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{IMAGE_FIELD}'"))
    })?;

    let info = inspect_image(&bytes)?;
    let relative = recipe_image_path(info.extension());
    media::store(&state.config.media_root, &relative, &bytes).await?;

    let recipe = match RecipeRepo::set_image(&state.pool, auth.user_id, id, &relative).await {
        Ok(Some(recipe)) => recipe,
        Ok(None) => {
            // Deleted since the ownership check.
            media::discard(&state.config.media_root, &relative).await;
            return Err(not_found(id));
        }
        Err(e) => {
            media::discard(&state.config.media_root, &relative).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        id,
        user_id = auth.user_id,
        width = info.width,
        height = info.height,
        path = %relative,
        "Recipe image uploaded",
    );
    Ok(Json(RecipeImage {
        id: recipe.id,
        image: recipe.image.as_deref().map(media_url),
    }))
}

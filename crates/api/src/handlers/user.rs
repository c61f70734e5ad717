//! Handlers for account creation, token exchange and the caller's profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use trove_core::error::CoreError;
use trove_core::types::DbId;
use trove_core::user::{normalize_email, validate_password};
use trove_core::validation::validate;
use trove_db::models::user::{CreateUser, CreatedUser, UpdateUser, UserProfile};
use trove_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Returned for every failed credential check, so callers cannot tell an
/// unknown email from a wrong password.
const BAD_CREDENTIALS: &str = "Unable to authenticate with provided credentials";

/// Request body for `POST /user/create` and `PUT /user/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Request body for `PATCH /user/me`. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

impl From<CreateUserRequest> for UpdateMeRequest {
    fn from(input: CreateUserRequest) -> Self {
        Self {
            email: Some(input.email),
            password: Some(input.password),
            name: Some(input.name),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Returned when an email belongs to another account.
const EMAIL_TAKEN: &str = "user with this email already exists.";

/// Constraint guarding email uniqueness; a violation is a client error here.
const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// Report a lost race on `uq_users_email` the same way as the up-front check.
fn email_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.constraint() == Some(EMAIL_CONSTRAINT) {
            return AppError::BadRequest(EMAIL_TAKEN.into());
        }
    }
    AppError::Database(err)
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// POST /api/v1/user/create
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreatedUser>)> {
    validate(&input)?;
    validate_password(&input.password)?;

    let email = normalize_email(&input.email);
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::BadRequest(EMAIL_TAKEN.into()));
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            name: input.name,
            password_hash: hash(&input.password)?,
        },
    )
    .await
    .map_err(email_conflict)?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(CreatedUser::from(&user))))
}

/// POST /api/v1/user/token
pub async fn token(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Both email and password are required".into(),
        ));
    }

    let email = normalize_email(&input.email);
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::BadRequest(BAD_CREDENTIALS.into()))?;

    let verified = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash unreadable: {e}")))?;
    if !verified || !user.is_active {
        tracing::info!(user_id = user.id, "Rejected token request");
        return Err(AppError::BadRequest(BAD_CREDENTIALS.into()));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "Issued access token");
    Ok(Json(TokenResponse { token }))
}

/// GET /api/v1/user/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(UserProfile::from(&user)))
}

/// PUT /api/v1/user/me
pub async fn replace_me(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserRequest>,
) -> AppResult<Json<UserProfile>> {
    apply_update(&state, auth.user_id, input.into()).await
}

/// PATCH /api/v1/user/me
pub async fn patch_me(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UpdateMeRequest>,
) -> AppResult<Json<UserProfile>> {
    apply_update(&state, auth.user_id, input).await
}

async fn apply_update(
    state: &AppState,
    user_id: DbId,
    input: UpdateMeRequest,
) -> AppResult<Json<UserProfile>> {
    validate(&input)?;
    if let Some(password) = &input.password {
        validate_password(password)?;
    }

    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        if let Some(owner) = UserRepo::find_by_email(&state.pool, email).await? {
            if owner.id != user_id {
                return Err(AppError::BadRequest(EMAIL_TAKEN.into()));
            }
        }
    }

    let update = UpdateUser {
        email,
        name: input.name,
        password_hash: input.password.as_deref().map(hash).transpose()?,
    };
    let user = UserRepo::update(&state.pool, user_id, &update)
        .await
        .map_err(email_conflict)?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    tracing::info!(
        user_id,
        password_changed = update.password_hash.is_some(),
        "User profile updated"
    );
    Ok(Json(UserProfile::from(&user)))
}

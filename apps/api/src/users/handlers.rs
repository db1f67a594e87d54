use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::models::user::User;
use crate::state::AppState;
use crate::users::avatar::gravatar_url;
use crate::users::validation::{normalize_email, LoginRequest, RegisterRequest};

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// GET /api/users/test
pub async fn handle_test() -> Json<Value> {
    Json(json!({ "msg": "Users works" }))
}

/// POST /api/users/register
pub async fn handle_register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    req.validate()?;

    let email = normalize_email(&req.email);
    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::field("email", "Email already exists"));
    }

    let password = state.passwords.hash(req.password).await?;
    let user = User {
        id: Uuid::new_v4(),
        name: req.name,
        avatar: gravatar_url(&email),
        email,
        password,
        created_at: Utc::now(),
    };
    // A concurrent registration can still slip past the lookup; the unique
    // index reports it as the same "Email already exists" error.
    state.store.insert_user(&user).await?;

    info!("Registered user {}", user.id);
    Ok(Json(RegisterResponse { user }))
}

/// POST /api/users/login
/// Returns a bearer token on success.
pub async fn handle_login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()?;

    let email = normalize_email(&req.email);
    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("email", "User not found"))?;

    if !state
        .passwords
        .verify(req.password, user.password.clone())
        .await?
    {
        return Err(AppError::field("password", "Password incorrect"));
    }

    let token = state.tokens.issue(&user)?;
    info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        success: true,
        token: format!("Bearer {token}"),
    }))
}

/// GET /api/users/current
pub async fn handle_current(AuthUser(user): AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

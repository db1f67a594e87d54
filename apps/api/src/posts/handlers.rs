use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, PathParams};
use crate::fields::parse_id;
use crate::models::post::Post;
use crate::posts::feed;
use crate::posts::validation::PostRequest;
use crate::state::AppState;

fn no_post() -> AppError {
    AppError::not_found("noPost", "Post not found")
}

async fn load_post(state: &AppState, id: Uuid) -> Result<Post, AppError> {
    state.store.find_post(id).await?.ok_or_else(no_post)
}

/// GET /api/posts
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.store.list_posts().await?))
}

/// GET /api/posts/:id
pub async fn handle_get(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id, no_post)?;
    Ok(Json(load_post(&state, id).await?))
}

/// POST /api/posts
pub async fn handle_create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<PostRequest>,
) -> Result<Json<Post>, AppError> {
    req.validate()?;

    let post = feed::new_post(&user, &req.text);
    state.store.insert_post(&post).await?;

    info!("User {} created post {}", user.id, post.id);
    Ok(Json(post))
}

/// DELETE /api/posts/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams(id): PathParams<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, no_post)?;
    let post = load_post(&state, id).await?;
    feed::ensure_author(&post, user.id)?;
    state.store.delete_post(id).await?;

    info!("User {} deleted post {id}", user.id);
    Ok(Json(json!({ "success": true })))
}

/// POST /api/posts/like/:id
pub async fn handle_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams(id): PathParams<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id, no_post)?;
    let mut post = load_post(&state, id).await?;
    feed::like(&mut post, user.id)?;
    state.store.save_post(&post).await?;
    Ok(Json(post))
}

/// POST /api/posts/unlike/:id
pub async fn handle_unlike(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams(id): PathParams<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id, no_post)?;
    let mut post = load_post(&state, id).await?;
    feed::unlike(&mut post, user.id)?;
    state.store.save_post(&post).await?;
    Ok(Json(post))
}

/// POST /api/posts/comment/:id
pub async fn handle_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams(id): PathParams<String>,
    JsonBody(req): JsonBody<PostRequest>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id, no_post)?;
    req.validate()?;

    let mut post = load_post(&state, id).await?;
    let comment_id = feed::add_comment(&mut post, &user, &req.text);
    state.store.save_post(&post).await?;

    info!("User {} commented {comment_id} on post {id}", user.id);
    Ok(Json(post))
}

/// DELETE /api/posts/comment/:id/:comment_id
pub async fn handle_uncomment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams((id, comment_id)): PathParams<(String, String)>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id, no_post)?;
    let comment_id = parse_id(&comment_id, feed::no_comment)?;
    let mut post = load_post(&state, id).await?;
    feed::remove_comment(&mut post, comment_id, user.id)?;
    state.store.save_post(&post).await?;

    info!("User {} removed comment {comment_id} from post {id}", user.id);
    Ok(Json(post))
}

pub mod health;


use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::posts::handlers as posts;
use crate::profiles::handlers as profiles;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/users/test", get(users::handle_test))
        .route("/api/users/register", post(users::handle_register))
        .route("/api/users/login", post(users::handle_login))
        .route("/api/users/current", get(users::handle_current))
        // Profiles
        .route(
            "/api/profiles",
            get(profiles::handle_current)
                .post(profiles::handle_upsert)
                .delete(profiles::handle_delete_account),
        )
        .route("/api/profiles/test", get(profiles::handle_test))
        .route("/api/profiles/all", get(profiles::handle_all))
        .route("/api/profiles/handle/:handle", get(profiles::handle_by_handle))
        .route("/api/profiles/user/:user_id", get(profiles::handle_by_user))
        .route(
            "/api/profiles/experience",
            post(profiles::handle_add_experience),
        )
        .route(
            "/api/profiles/experience/:exp_id",
            delete(profiles::handle_remove_experience),
        )
        .route(
            "/api/profiles/education",
            post(profiles::handle_add_education),
        )
        .route(
            "/api/profiles/education/:edu_id",
            delete(profiles::handle_remove_education),
        )
        // Posts
        .route("/api/posts", get(posts::handle_list).post(posts::handle_create))
        .route(
            "/api/posts/:id",
            get(posts::handle_get).delete(posts::handle_delete),
        )
        .route("/api/posts/like/:id", post(posts::handle_like))
        .route("/api/posts/unlike/:id", post(posts::handle_unlike))
        .route("/api/posts/comment/:id", post(posts::handle_comment))
        .route(
            "/api/posts/comment/:id/:comment_id",
            delete(posts::handle_uncomment),
        )
        .with_state(state);

    // Single-page frontend: unknown paths fall through to index.html.
    match static_dir {
        Some(dir) => {
            info!("Serving frontend from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router,
    }
}

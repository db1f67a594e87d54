//! Persistence seam. `AppState` carries an `Arc<dyn Store>`; production uses
//! `PgStore`, tests use the in-memory implementation.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::post::Post;
use crate::models::profile::{Profile, ProfileView};
use crate::models::user::User;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write. Carries the offending field.
    #[error("duplicate {0}")]
    Duplicate(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// How a single profile is located.
#[derive(Debug, Clone, Copy)]
pub enum ProfileLookup<'a> {
    User(Uuid),
    Handle(&'a str),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    /// Removes the user and, with it, any profile it owns.
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;

    async fn find_profile(&self, lookup: ProfileLookup<'_>) -> StoreResult<Option<Profile>>;
    /// Like `find_profile`, with the owner's name and avatar attached.
    async fn find_profile_view(&self, lookup: ProfileLookup<'_>)
        -> StoreResult<Option<ProfileView>>;
    /// All profiles, newest first.
    async fn list_profile_views(&self) -> StoreResult<Vec<ProfileView>>;
    async fn insert_profile(&self, profile: &Profile) -> StoreResult<()>;
    /// Overwrites every mutable field of the stored profile.
    async fn update_profile(&self, profile: &Profile) -> StoreResult<()>;
    /// Returns whether a profile existed.
    async fn delete_profile_by_user(&self, user_id: Uuid) -> StoreResult<bool>;

    /// All posts, newest first.
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;
    async fn find_post(&self, id: Uuid) -> StoreResult<Option<Post>>;
    async fn insert_post(&self, post: &Post) -> StoreResult<()>;
    /// Writes back text, likes and comments. Last writer wins.
    async fn save_post(&self, post: &Post) -> StoreResult<()>;
    async fn delete_post(&self, id: Uuid) -> StoreResult<()>;
}

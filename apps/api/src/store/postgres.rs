use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::post::Post;
use crate::models::profile::{Profile, ProfileView};
use crate::models::user::{User, UserSummary};
use crate::store::{ProfileLookup, Store, StoreError, StoreResult};

/// PostgreSQL-backed store. Embedded lists live in JSONB columns and are
/// rewritten whole on every save.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProfileViewRow {
    #[sqlx(flatten)]
    profile: Profile,
    owner_name: String,
    owner_avatar: String,
}

impl From<ProfileViewRow> for ProfileView {
    fn from(row: ProfileViewRow) -> Self {
        let user = UserSummary {
            id: row.profile.user_id,
            name: row.owner_name,
            avatar: row.owner_avatar,
        };
        ProfileView {
            profile: row.profile,
            user,
        }
    }
}

const PROFILE_VIEW_SELECT: &str = r#"
    SELECT p.*, u.name AS owner_name, u.avatar AS owner_avatar
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

/// Maps unique-index violations to the field the index guards.
fn map_unique(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = match db.constraint() {
                Some("users_email_key") => "email",
                Some("profiles_handle_key") => "handle",
                Some("profiles_user_id_key") => "profile",
                _ => "record",
            };
            return StoreError::Duplicate(field);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password, avatar, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.avatar)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique)?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        // profiles.user_id cascades
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_profile(&self, lookup: ProfileLookup<'_>) -> StoreResult<Option<Profile>> {
        let query = match lookup {
            ProfileLookup::User(user_id) => {
                sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
                    .bind(user_id)
            }
            ProfileLookup::Handle(handle) => {
                sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE handle = $1")
                    .bind(handle)
            }
        };
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn find_profile_view(
        &self,
        lookup: ProfileLookup<'_>,
    ) -> StoreResult<Option<ProfileView>> {
        let row = match lookup {
            ProfileLookup::User(user_id) => {
                sqlx::query_as::<_, ProfileViewRow>(&format!(
                    "{PROFILE_VIEW_SELECT} WHERE p.user_id = $1"
                ))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
            }
            ProfileLookup::Handle(handle) => {
                sqlx::query_as::<_, ProfileViewRow>(&format!(
                    "{PROFILE_VIEW_SELECT} WHERE p.handle = $1"
                ))
                .bind(handle)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(row.map(ProfileView::from))
    }

    async fn list_profile_views(&self) -> StoreResult<Vec<ProfileView>> {
        let rows = sqlx::query_as::<_, ProfileViewRow>(&format!(
            "{PROFILE_VIEW_SELECT} ORDER BY p.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ProfileView::from).collect())
    }

    async fn insert_profile(&self, profile: &Profile) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, user_id, handle, company, website, location, status, skills,
                 bio, github_username, experience, education, social, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.handle)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.status)
        .bind(&profile.skills)
        .bind(&profile.bio)
        .bind(&profile.github_username)
        .bind(&profile.experience)
        .bind(&profile.education)
        .bind(&profile.social)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique)?;
        Ok(())
    }

    async fn update_profile(&self, profile: &Profile) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                handle = $2, company = $3, website = $4, location = $5, status = $6,
                skills = $7, bio = $8, github_username = $9, experience = $10,
                education = $11, social = $12
            WHERE id = $1
            "#,
        )
        .bind(profile.id)
        .bind(&profile.handle)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.status)
        .bind(&profile.skills)
        .bind(&profile.bio)
        .bind(&profile.github_username)
        .bind(&profile.experience)
        .bind(&profile.education)
        .bind(&profile.social)
        .execute(&self.pool)
        .await
        .map_err(map_unique)?;
        Ok(())
    }

    async fn delete_profile_by_user(&self, user_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(
            sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn find_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        Ok(sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_post(&self, post: &Post) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, text, name, avatar, likes, comments, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.text)
        .bind(&post.name)
        .bind(&post.avatar)
        .bind(&post.likes)
        .bind(&post.comments)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_post(&self, post: &Post) -> StoreResult<()> {
        sqlx::query("UPDATE posts SET text = $2, likes = $3, comments = $4 WHERE id = $1")
            .bind(post.id)
            .bind(&post.text)
            .bind(&post.likes)
            .bind(&post.comments)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::post::Post;
use crate::models::profile::{Profile, ProfileView};
use crate::models::user::{User, UserSummary};
use crate::store::{ProfileLookup, Store, StoreError, StoreResult};

/// In-process store with the same uniqueness rules as the database schema.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Documents>,
}

#[derive(Default)]
struct Documents {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
}

impl Documents {
    fn matches(profile: &Profile, lookup: ProfileLookup<'_>) -> bool {
        match lookup {
            ProfileLookup::User(user_id) => profile.user_id == user_id,
            ProfileLookup::Handle(handle) => profile.handle == handle,
        }
    }

    fn view(&self, profile: &Profile) -> Option<ProfileView> {
        let owner = self.users.iter().find(|u| u.id == profile.user_id)?;
        Some(ProfileView {
            profile: profile.clone(),
            user: UserSummary::from(owner),
        })
    }

    fn check_profile_unique(&self, profile: &Profile) -> StoreResult<()> {
        for other in self.profiles.iter().filter(|p| p.id != profile.id) {
            if other.handle == profile.handle {
                return Err(StoreError::Duplicate("handle"));
            }
            if other.user_id == profile.user_id {
                return Err(StoreError::Duplicate("profile"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut docs = self.inner.write().await;
        if docs.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email"));
        }
        docs.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let docs = self.inner.read().await;
        Ok(docs.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let docs = self.inner.read().await;
        Ok(docs.users.iter().find(|u| u.id == id).cloned())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut docs = self.inner.write().await;
        docs.users.retain(|u| u.id != id);
        docs.profiles.retain(|p| p.user_id != id);
        Ok(())
    }

    async fn find_profile(&self, lookup: ProfileLookup<'_>) -> StoreResult<Option<Profile>> {
        let docs = self.inner.read().await;
        Ok(docs
            .profiles
            .iter()
            .find(|p| Documents::matches(p, lookup))
            .cloned())
    }

    async fn find_profile_view(
        &self,
        lookup: ProfileLookup<'_>,
    ) -> StoreResult<Option<ProfileView>> {
        let docs = self.inner.read().await;
        Ok(docs
            .profiles
            .iter()
            .find(|p| Documents::matches(p, lookup))
            .and_then(|p| docs.view(p)))
    }

    async fn list_profile_views(&self) -> StoreResult<Vec<ProfileView>> {
        let docs = self.inner.read().await;
        let mut views: Vec<_> = docs.profiles.iter().filter_map(|p| docs.view(p)).collect();
        views.sort_by(|a, b| b.profile.created_at.cmp(&a.profile.created_at));
        Ok(views)
    }

    async fn insert_profile(&self, profile: &Profile) -> StoreResult<()> {
        let mut docs = self.inner.write().await;
        docs.check_profile_unique(profile)?;
        docs.profiles.push(profile.clone());
        Ok(())
    }

    async fn update_profile(&self, profile: &Profile) -> StoreResult<()> {
        let mut docs = self.inner.write().await;
        docs.check_profile_unique(profile)?;
        if let Some(slot) = docs.profiles.iter_mut().find(|p| p.id == profile.id) {
            *slot = profile.clone();
        }
        Ok(())
    }

    async fn delete_profile_by_user(&self, user_id: Uuid) -> StoreResult<bool> {
        let mut docs = self.inner.write().await;
        let before = docs.profiles.len();
        docs.profiles.retain(|p| p.user_id != user_id);
        Ok(docs.profiles.len() != before)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let docs = self.inner.read().await;
        let mut posts = docs.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let docs = self.inner.read().await;
        Ok(docs.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> StoreResult<()> {
        self.inner.write().await.posts.push(post.clone());
        Ok(())
    }

    async fn save_post(&self, post: &Post) -> StoreResult<()> {
        let mut docs = self.inner.write().await;
        if let Some(slot) = docs.posts.iter_mut().find(|p| p.id == post.id) {
            *slot = post.clone();
        }
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<()> {
        self.inner.write().await.posts.retain(|p| p.id != id);
        Ok(())
    }
}

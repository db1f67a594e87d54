use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, PathParams};
use crate::fields::parse_id;
use crate::models::profile::{Profile, ProfileView};
use crate::models::user::{User, UserSummary};
use crate::profiles::document::{
    add_education, add_experience, apply_request, new_profile, no_education, no_experience,
    remove_education, remove_experience,
};
use crate::profiles::validation::{EducationRequest, ExperienceRequest, ProfileRequest};
use crate::state::AppState;
use crate::store::ProfileLookup;

fn no_profile() -> AppError {
    AppError::not_found("noProfile", "There is no profile for this user")
}

fn view(profile: Profile, owner: &User) -> Json<ProfileView> {
    Json(ProfileView {
        profile,
        user: UserSummary::from(owner),
    })
}

async fn own_profile(state: &AppState, user: &User) -> Result<Profile, AppError> {
    state
        .store
        .find_profile(ProfileLookup::User(user.id))
        .await?
        .ok_or_else(no_profile)
}

/// GET /api/profiles/test
pub async fn handle_test() -> Json<Value> {
    Json(json!({ "msg": "Profiles works" }))
}

/// GET /api/profiles
pub async fn handle_current(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileView>, AppError> {
    let profile = state
        .store
        .find_profile_view(ProfileLookup::User(user.id))
        .await?
        .ok_or_else(no_profile)?;
    Ok(Json(profile))
}

/// GET /api/profiles/all
pub async fn handle_all(State(state): State<AppState>) -> Result<Json<Vec<ProfileView>>, AppError> {
    let profiles = state.store.list_profile_views().await?;
    if profiles.is_empty() {
        return Err(AppError::not_found("noProfiles", "There are no profiles"));
    }
    Ok(Json(profiles))
}

/// GET /api/profiles/handle/:handle
pub async fn handle_by_handle(
    State(state): State<AppState>,
    PathParams(handle): PathParams<String>,
) -> Result<Json<ProfileView>, AppError> {
    let profile = state
        .store
        .find_profile_view(ProfileLookup::Handle(&handle))
        .await?
        .ok_or_else(no_profile)?;
    Ok(Json(profile))
}

/// GET /api/profiles/user/:user_id
pub async fn handle_by_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
) -> Result<Json<ProfileView>, AppError> {
    let user_id = parse_id(&user_id, no_profile)?;
    let profile = state
        .store
        .find_profile_view(ProfileLookup::User(user_id))
        .await?
        .ok_or_else(no_profile)?;
    Ok(Json(profile))
}

/// POST /api/profiles
/// Creates the caller's profile, or replaces its editable fields if one exists.
pub async fn handle_upsert(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<ProfileRequest>,
) -> Result<Json<ProfileView>, AppError> {
    req.validate()?;

    let handle = req.handle.as_str();
    if let Some(holder) = state.store.find_profile(ProfileLookup::Handle(handle)).await? {
        if holder.user_id != user.id {
            return Err(AppError::field("handle", "That handle already exists"));
        }
    }

    let profile = match state.store.find_profile(ProfileLookup::User(user.id)).await? {
        Some(mut existing) => {
            apply_request(&mut existing, req);
            state.store.update_profile(&existing).await?;
            info!("Updated profile {} for user {}", existing.id, user.id);
            existing
        }
        None => {
            let profile = new_profile(user.id, req);
            state.store.insert_profile(&profile).await?;
            info!("Created profile {} for user {}", profile.id, user.id);
            profile
        }
    };

    Ok(view(profile, &user))
}

/// POST /api/profiles/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<ExperienceRequest>,
) -> Result<Json<ProfileView>, AppError> {
    req.validate()?;

    let mut profile = own_profile(&state, &user).await?;
    let id = add_experience(&mut profile, req)?;
    state.store.update_profile(&profile).await?;

    info!("Added experience {id} to profile {}", profile.id);
    Ok(view(profile, &user))
}

/// DELETE /api/profiles/experience/:exp_id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams(exp_id): PathParams<String>,
) -> Result<Json<ProfileView>, AppError> {
    let exp_id = parse_id(&exp_id, no_experience)?;
    let mut profile = own_profile(&state, &user).await?;
    remove_experience(&mut profile, exp_id)?;
    state.store.update_profile(&profile).await?;

    info!("Removed experience {exp_id} from profile {}", profile.id);
    Ok(view(profile, &user))
}

/// POST /api/profiles/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<EducationRequest>,
) -> Result<Json<ProfileView>, AppError> {
    req.validate()?;

    let mut profile = own_profile(&state, &user).await?;
    let id = add_education(&mut profile, req)?;
    state.store.update_profile(&profile).await?;

    info!("Added education {id} to profile {}", profile.id);
    Ok(view(profile, &user))
}

/// DELETE /api/profiles/education/:edu_id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParams(edu_id): PathParams<String>,
) -> Result<Json<ProfileView>, AppError> {
    let edu_id = parse_id(&edu_id, no_education)?;
    let mut profile = own_profile(&state, &user).await?;
    remove_education(&mut profile, edu_id)?;
    state.store.update_profile(&profile).await?;

    info!("Removed education {edu_id} from profile {}", profile.id);
    Ok(view(profile, &user))
}

/// DELETE /api/profiles
/// Deletes the caller's profile and account. Their posts stay up.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, AppError> {
    let had_profile = state.store.delete_profile_by_user(user.id).await?;
    state.store.delete_user(user.id).await?;

    info!("Deleted user {} (profile removed: {had_profile})", user.id);
    Ok(Json(json!({ "success": true })))
}

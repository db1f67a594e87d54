//! Pure edits on a profile document. Handlers load, call one of these, save.

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::fields::parse_date;
use crate::models::profile::{Education, Experience, Profile, Social};
use crate::profiles::validation::{EducationRequest, ExperienceRequest, ProfileRequest};

/// "rust, sql,, go" → ["rust", "sql", "go"]
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn social_links(req: &ProfileRequest) -> Social {
    Social {
        youtube: req.youtube.clone(),
        twitter: req.twitter.clone(),
        facebook: req.facebook.clone(),
        linkedin: req.linkedin.clone(),
        instagram: req.instagram.clone(),
    }
}

/// A fresh profile for `user_id` with empty experience and education.
pub fn new_profile(user_id: Uuid, req: ProfileRequest) -> Profile {
    let mut profile = Profile {
        id: Uuid::new_v4(),
        user_id,
        handle: String::new(),
        company: None,
        website: None,
        location: None,
        status: String::new(),
        skills: Vec::new(),
        bio: None,
        github_username: None,
        experience: Json(Vec::new()),
        education: Json(Vec::new()),
        social: Json(Social::default()),
        created_at: Utc::now(),
    };
    apply_request(&mut profile, req);
    profile
}

/// Replaces every editable field. Experience and education are untouched.
pub fn apply_request(profile: &mut Profile, req: ProfileRequest) {
    profile.social = Json(social_links(&req));
    profile.skills = split_skills(&req.skills);
    profile.handle = req.handle;
    profile.status = req.status;
    profile.company = req.company;
    profile.website = req.website;
    profile.location = req.location;
    profile.bio = req.bio;
    profile.github_username = req.github_username;
}

/// Validates dates and prepends the entry. Returns the new entry's id.
pub fn add_experience(profile: &mut Profile, req: ExperienceRequest) -> Result<Uuid, AppError> {
    let from = parse_date("from", &req.from)?;
    let to = match (&req.to, req.current) {
        (Some(to), false) => Some(parse_date("to", to)?),
        _ => None,
    };

    let id = Uuid::new_v4();
    profile.experience.insert(
        0,
        Experience {
            id,
            title: req.title,
            company: req.company,
            location: req.location,
            from,
            to,
            current: req.current,
            description: req.description,
        },
    );
    Ok(id)
}

pub fn no_experience() -> AppError {
    AppError::not_found("experienceNotFound", "Experience not found")
}

pub fn remove_experience(profile: &mut Profile, id: Uuid) -> Result<(), AppError> {
    let index = profile
        .experience
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(no_experience)?;
    profile.experience.remove(index);
    Ok(())
}

pub fn add_education(profile: &mut Profile, req: EducationRequest) -> Result<Uuid, AppError> {
    let from = parse_date("from", &req.from)?;
    let to = match (&req.to, req.current) {
        (Some(to), false) => Some(parse_date("to", to)?),
        _ => None,
    };

    let id = Uuid::new_v4();
    profile.education.insert(
        0,
        Education {
            id,
            school: req.school,
            degree: req.degree,
            field_of_study: req.field_of_study,
            from,
            to,
            current: req.current,
            description: req.description,
        },
    );
    Ok(id)
}

pub fn no_education() -> AppError {
    AppError::not_found("educationNotFound", "Education not found")
}

pub fn remove_education(profile: &mut Profile, id: Uuid) -> Result<(), AppError> {
    let index = profile
        .education
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(no_education)?;
    profile.education.remove(index);
    Ok(())
}

use serde::Deserialize;
use validator::Validate;

use crate::fields::{blank_as_none, required, trimmed};

/// Create-or-edit form for the caller's profile.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Profile handle is required"))]
    #[validate(length(min = 2, max = 40, message = "Handle needs to be between 2 and 40 characters"))]
    pub handle: String,

    #[serde(deserialize_with = "blank_as_none")]
    pub company: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(url(message = "Not a valid URL"))]
    pub website: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    pub location: Option<String>,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Status field is required"))]
    pub status: String,

    /// Comma-separated.
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Skills field is required"))]
    pub skills: String,

    #[serde(deserialize_with = "blank_as_none")]
    pub bio: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    pub github_username: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(url(message = "Not a valid URL"))]
    pub youtube: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(url(message = "Not a valid URL"))]
    pub twitter: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(url(message = "Not a valid URL"))]
    pub facebook: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(url(message = "Not a valid URL"))]
    pub linkedin: Option<String>,

    #[serde(deserialize_with = "blank_as_none")]
    #[validate(url(message = "Not a valid URL"))]
    pub instagram: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ExperienceRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Job title field is required"))]
    pub title: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Company field is required"))]
    pub company: String,

    #[serde(deserialize_with = "blank_as_none")]
    pub location: Option<String>,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "From date field is required"))]
    pub from: String,

    #[serde(deserialize_with = "blank_as_none")]
    pub to: Option<String>,

    pub current: bool,

    #[serde(deserialize_with = "blank_as_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "School field is required"))]
    pub school: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Degree field is required"))]
    pub degree: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Field of study is required"))]
    pub field_of_study: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Start date is required"))]
    pub from: String,

    #[serde(deserialize_with = "blank_as_none")]
    pub to: Option<String>,

    pub current: bool,

    #[serde(deserialize_with = "blank_as_none")]
    pub description: Option<String>,
}

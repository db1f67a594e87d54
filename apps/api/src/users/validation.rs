use serde::Deserialize;
use validator::Validate;

use crate::fields::{required, trimmed};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Name field is required"))]
    #[validate(length(min = 2, max = 30, message = "Name must be between 2 and 30 characters"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Email field is required"))]
    #[validate(email(message = "Email is invalid"))]
    pub email: String,

    #[validate(custom(function = "required", message = "Password field is required"))]
    #[validate(length(min = 6, max = 30, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(custom(function = "required", message = "Confirm Password field is required"))]
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub password2: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Email field is required"))]
    #[validate(email(message = "Email is invalid"))]
    pub email: String,

    #[validate(custom(function = "required", message = "Password field is required"))]
    pub password: String,
}

/// Emails are matched case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

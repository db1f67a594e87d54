use serde::Deserialize;
use validator::Validate;

use crate::fields::{required, trimmed};

/// Body of a new post or comment.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required", message = "Text field is required"))]
    #[validate(length(min = 10, max = 300, message = "Post must be between 10 and 300 characters"))]
    pub text: String,
}

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Field name → human-readable message. This is the body of every 400 response.
pub type FieldErrors = BTreeMap<String, String>;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Client-facing variants render as a JSON object keyed by field.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0:?}")]
    Validation(FieldErrors),

    #[error("Not found: {message}")]
    NotFound {
        key: &'static str,
        message: &'static str,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {message}")]
    Forbidden {
        key: &'static str,
        message: &'static str,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// A 400 carrying a single field message.
    pub fn field(key: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(key.to_string(), message.to_string());
        AppError::Validation(errors)
    }

    pub fn not_found(key: &'static str, message: &'static str) -> Self {
        AppError::NotFound { key, message }
    }

    pub fn forbidden() -> Self {
        AppError::Forbidden {
            key: "notAuthorized",
            message: "User not authorized",
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

/// Unreadable or mistyped bodies are reported against `body`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {rejection}");
        AppError::field("body", &rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameters: {rejection}");
        AppError::not_found("notFound", "Resource not found")
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate("email") => AppError::field("email", "Email already exists"),
            StoreError::Duplicate("handle") => {
                AppError::field("handle", "That handle already exists")
            }
            StoreError::Duplicate(field) => {
                AppError::field(field, &format!("That {field} is already taken"))
            }
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::Token(_) => AppError::Unauthorized,
            AuthError::Hash(e) => AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")),
            AuthError::Worker(e) => AppError::Internal(anyhow::anyhow!("hashing task failed: {e}")),
        }
    }
}

/// Folds validator output into one message per field, camelCased.
/// A "required" failure wins over any other failure on the same field.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let chosen = errs
                .iter()
                .find(|e| e.code == "required")
                .or_else(|| errs.first())?;
            let key = camel_case(&field);
            let message = chosen
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{key} is invalid"));
            Some((key, message))
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, json!(errors)),
            AppError::NotFound { key, message } => (StatusCode::NOT_FOUND, json!({ key: message })),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "unauthorized": "Unauthorized" }),
            ),
            AppError::Forbidden { key, message } => {
                (StatusCode::FORBIDDEN, json!({ key: message }))
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "server": "A database error occurred" }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "server": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("field_of_study"), "fieldOfStudy");
        assert_eq!(camel_case("password2"), "password2");
        assert_eq!(camel_case("githubUsername"), "githubUsername");
    }

    #[test]
    fn test_required_error_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "name",
            ValidationError::new("length").with_message("Name must be between 2 and 30 characters".into()),
        );
        errors.add(
            "name",
            ValidationError::new("required").with_message("Name field is required".into()),
        );
        let fields = field_errors(&errors);
        assert_eq!(fields["name"], "Name field is required");
    }

    #[test]
    fn test_duplicate_email_maps_to_email_field() {
        match AppError::from(StoreError::Duplicate("email")) {
            AppError::Validation(fields) => assert_eq!(fields["email"], "Email already exists"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::field("text", "Text field is required").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("noPost", "Post not found").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::forbidden().into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}

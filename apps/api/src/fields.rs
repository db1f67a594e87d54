//! Helpers shared by the request types: validator hooks, serde adapters and
//! path id parsing.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::ValidationError;

use crate::errors::AppError;

/// Fails on empty or whitespace-only input with code `required`.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Trims surrounding whitespace before validation sees the value.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Parses a UUID path segment. A malformed id is answered like a missing record.
pub fn parse_id(raw: &str, missing: fn() -> AppError) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| missing())
}

/// Treats absent, null and blank strings alike: all become `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Parses a `YYYY-MM-DD` form date, reporting failures against `field`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::field(field, "Date must be YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "blank_as_none")]
        bio: Option<String>,
        #[serde(default, deserialize_with = "trimmed")]
        handle: String,
    }

    #[test]
    fn test_required() {
        assert!(required("x").is_ok());
        assert_eq!(required("   ").unwrap_err().code, "required");
        assert!(required("").is_err());
    }

    #[test]
    fn test_blank_as_none() {
        let f: Form = serde_json::from_str(r#"{"bio": "  "}"#).unwrap();
        assert_eq!(f.bio, None);
        let f: Form = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(f.bio, None);
        let f: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(f.bio, None);
        let f: Form = serde_json::from_str(r#"{"bio": " Rustacean "}"#).unwrap();
        assert_eq!(f.bio.as_deref(), Some("Rustacean"));
    }

    #[test]
    fn test_trimmed() {
        let f: Form = serde_json::from_str(r#"{"handle": "  ada  "}"#).unwrap();
        assert_eq!(f.handle, "ada");
        let f: Form = serde_json::from_str(r#"{"handle": "   "}"#).unwrap();
        assert_eq!(f.handle, "");
        let f: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(f.handle, "");
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        let missing = || AppError::not_found("noPost", "Post not found");
        assert_eq!(parse_id(&id.to_string(), missing).unwrap(), id);
        assert!(matches!(
            parse_id("not-an-id", missing),
            Err(AppError::NotFound { key: "noPost", .. })
        ));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("from", "2020-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
        match parse_date("from", "02/29/2020") {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields["from"], "Date must be YYYY-MM-DD")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}

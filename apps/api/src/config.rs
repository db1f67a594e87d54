use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

/// Tokens live at most a year.
const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Lifetime of issued bearer tokens, in seconds.
    pub token_ttl_secs: i64,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the built frontend bundle. Served only when set.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_secs: parse_token_ttl(std::env::var("TOKEN_TTL_SECS").ok())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            static_dir: std::env::var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_token_ttl(raw: Option<String>) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(3600);
    };
    let secs = raw
        .trim()
        .parse::<i64>()
        .context("TOKEN_TTL_SECS must be a whole number of seconds")?;
    ensure!(
        (1..=MAX_TOKEN_TTL_SECS).contains(&secs),
        "TOKEN_TTL_SECS must be between 1 and {MAX_TOKEN_TTL_SECS}, got {secs}"
    );
    Ok(secs)
}

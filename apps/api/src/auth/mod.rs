//! Credentials: password hashing, bearer tokens and the request guard that
//! admits authenticated requests.

pub mod extractor;
pub mod password;
pub mod token;

use thiserror::Error;

pub use extractor::AuthUser;
pub use password::PasswordHasher;
pub use token::TokenKeys;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hash error: {0}")]
    Hash(#[from] argon2::password_hash::Error),

    #[error("hashing worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

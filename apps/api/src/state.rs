use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenKeys};
use crate::config::Config;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: `PgStore`.
    pub store: Arc<dyn Store>,
    pub passwords: PasswordHasher,
    pub tokens: TokenKeys,
    pub config: Config,
}

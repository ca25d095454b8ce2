//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{PostRepository, TokenService, UserRepository};
use scribe_infra::JwtTokenService;
use scribe_infra::auth::JwtConfig;
use scribe_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with in-memory stores.
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!(
            database_url = %config.database_url,
            "Using in-memory storage; DATABASE_URL is not used"
        );

        Self::with_secret(&config.jwt_secret)
    }

    /// Fresh, empty stores and a token service signing with `secret`.
    pub fn with_secret(secret: &str) -> Self {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: secret.to_string(),
        });

        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            tokens: Arc::new(tokens),
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::admin::HitCounter;
use crate::auth::TokenConfig;
use crate::chirp::repository::ChirpRepository;
use crate::config::Platform;
use crate::session::repository::RefreshTokenRepository;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub refresh_token_repository: Arc<dyn RefreshTokenRepository + Send + Sync>,
    pub chirp_repository: Arc<dyn ChirpRepository + Send + Sync>,
    pub token_config: TokenConfig,
    pub platform: Platform,
    pub polka_key: String,
    pub hits: HitCounter,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        refresh_token_repository: Arc<dyn RefreshTokenRepository + Send + Sync>,
        chirp_repository: Arc<dyn ChirpRepository + Send + Sync>,
        token_config: TokenConfig,
        platform: Platform,
        polka_key: String,
    ) -> Self {
        Self {
            user_repository,
            refresh_token_repository,
            chirp_repository,
            token_config,
            platform,
            polka_key,
            hits: HitCounter::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Malformed credential")]
    MalformedCredential,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Credential failures map to a bare status code. The reason (bad
        // signature, expiry, revocation, unknown token) stays in the log.
        match self {
            AppError::MissingCredential
            | AppError::MalformedCredential
            | AppError::Unauthenticated => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Database(msg) => {
                error!(error = %msg, "Request failed with database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Something went wrong" })),
                )
                    .into_response()
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Something went wrong" })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::chirp::repository::InMemoryChirpRepository;
    use crate::session::repository::InMemoryRefreshTokenRepository;
    use crate::user::repository::InMemoryUserRepository;
    use chrono::Duration;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        user_repository: Option<Arc<dyn UserRepository + Send + Sync>>,
        refresh_token_repository: Option<Arc<dyn RefreshTokenRepository + Send + Sync>>,
        chirp_repository: Option<Arc<dyn ChirpRepository + Send + Sync>>,
        token_config: Option<TokenConfig>,
        platform: Platform,
        polka_key: String,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                user_repository: None,
                refresh_token_repository: None,
                chirp_repository: None,
                token_config: None,
                platform: Platform::Development,
                polka_key: "test-polka-key".to_string(),
            }
        }

        pub fn with_user_repository(mut self, repo: Arc<dyn UserRepository + Send + Sync>) -> Self {
            self.user_repository = Some(repo);
            self
        }

        pub fn with_refresh_token_repository(
            mut self,
            repo: Arc<dyn RefreshTokenRepository + Send + Sync>,
        ) -> Self {
            self.refresh_token_repository = Some(repo);
            self
        }

        pub fn with_chirp_repository(
            mut self,
            repo: Arc<dyn ChirpRepository + Send + Sync>,
        ) -> Self {
            self.chirp_repository = Some(repo);
            self
        }

        pub fn with_token_config(mut self, token_config: TokenConfig) -> Self {
            self.token_config = Some(token_config);
            self
        }

        pub fn with_platform(mut self, platform: Platform) -> Self {
            self.platform = platform;
            self
        }

        pub fn with_polka_key(mut self, polka_key: impl Into<String>) -> Self {
            self.polka_key = polka_key.into();
            self
        }

        pub fn build(self) -> AppState {
            AppState::new(
                self.user_repository
                    .unwrap_or_else(|| Arc::new(InMemoryUserRepository::new())),
                self.refresh_token_repository
                    .unwrap_or_else(|| Arc::new(InMemoryRefreshTokenRepository::new())),
                self.chirp_repository
                    .unwrap_or_else(|| Arc::new(InMemoryChirpRepository::new())),
                self.token_config
                    .unwrap_or_else(|| TokenConfig::new("test-secret", Duration::hours(1))),
                self.platform,
                self.polka_key,
            )
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{models::RefreshTokenModel, repository::RefreshTokenRepository};
use crate::auth::TokenConfig;
use crate::shared::AppError;

/// Service for the refresh token lifecycle.
///
/// Refresh tokens are the stateful half of the two-tier credential design:
/// access tokens verify offline and cannot be revoked, refresh tokens live
/// in the store and can.
pub struct SessionService {
    repository: Arc<dyn RefreshTokenRepository + Send + Sync>,
    token_config: TokenConfig,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn RefreshTokenRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            repository,
            token_config,
        }
    }

    /// Issues and persists a new refresh token bound to the given user
    #[instrument(skip(self))]
    pub async fn issue_refresh_token(&self, user_id: Uuid) -> Result<RefreshTokenModel, AppError> {
        let token = RefreshTokenModel::new(user_id);
        self.repository.create_token(&token).await?;

        info!(user_id = %user_id, "Refresh token issued");
        Ok(token)
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// The refresh token itself is not rotated; it stays valid until its
    /// own expiry or an explicit revoke.
    #[instrument(skip(self, refresh_token))]
    pub async fn exchange_for_access_token(&self, refresh_token: &str) -> Result<String, AppError> {
        let record = self
            .repository
            .get_token(refresh_token)
            .await?
            .ok_or_else(|| {
                warn!("Refresh attempt with unknown token");
                AppError::Unauthenticated
            })?;

        if !record.is_usable() {
            warn!(
                user_id = %record.user_id,
                expired = record.is_expired(),
                revoked = record.is_revoked(),
                "Refresh attempt with unusable token"
            );
            return Err(AppError::Unauthenticated);
        }

        debug!(user_id = %record.user_id, "Refresh token exchanged for access token");
        self.token_config.issue(record.user_id)
    }

    /// Revokes a refresh token. Idempotent: revoking an already-revoked or
    /// unknown token is a successful no-op.
    #[instrument(skip(self, refresh_token))]
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        let existed = self.repository.revoke_token(refresh_token).await?;

        if existed {
            info!("Refresh token revoked");
        } else {
            debug!("Revoke called for unknown token, treating as no-op");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::repository::InMemoryRefreshTokenRepository;
    use chrono::Duration;

    fn service_with_repo() -> (SessionService, Arc<InMemoryRefreshTokenRepository>) {
        let repo = Arc::new(InMemoryRefreshTokenRepository::new());
        let service = SessionService::new(
            repo.clone(),
            TokenConfig::new("test-secret", Duration::hours(1)),
        );
        (service, repo)
    }

    #[tokio::test]
    async fn test_issue_and_exchange() {
        let (service, _repo) = service_with_repo();
        let user_id = Uuid::new_v4();

        let refresh_token = service.issue_refresh_token(user_id).await.unwrap();
        assert!(refresh_token.is_usable());

        let access_token = service
            .exchange_for_access_token(&refresh_token.token)
            .await
            .unwrap();

        // The minted access token asserts the bound user
        let config = TokenConfig::new("test-secret", Duration::hours(1));
        assert_eq!(config.validate(&access_token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_exchange_unknown_token() {
        let (service, _repo) = service_with_repo();
        let result = service.exchange_for_access_token("unknown-token").await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_exchange_revoked_token() {
        let (service, _repo) = service_with_repo();
        let refresh_token = service.issue_refresh_token(Uuid::new_v4()).await.unwrap();

        service.revoke(&refresh_token.token).await.unwrap();

        let result = service.exchange_for_access_token(&refresh_token.token).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_exchange_expired_token() {
        let (service, repo) = service_with_repo();

        let mut token = RefreshTokenModel::new(Uuid::new_v4());
        token.expires_at = chrono::Utc::now() - Duration::hours(1);
        repo.create_token(&token).await.unwrap();

        let result = service.exchange_for_access_token(&token.token).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_exchange_does_not_rotate() {
        let (service, _repo) = service_with_repo();
        let refresh_token = service.issue_refresh_token(Uuid::new_v4()).await.unwrap();

        // The same refresh token can be exchanged repeatedly
        service
            .exchange_for_access_token(&refresh_token.token)
            .await
            .unwrap();
        service
            .exchange_for_access_token(&refresh_token.token)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let (service, _repo) = service_with_repo();
        let refresh_token = service.issue_refresh_token(Uuid::new_v4()).await.unwrap();

        service.revoke(&refresh_token.token).await.unwrap();
        service.revoke(&refresh_token.token).await.unwrap();
        service.revoke("never-existed").await.unwrap();
    }
}

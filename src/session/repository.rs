use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::RefreshTokenModel;
use crate::shared::AppError;

/// Trait for refresh token repository operations
#[async_trait]
pub trait RefreshTokenRepository {
    async fn create_token(&self, token: &RefreshTokenModel) -> Result<(), AppError>;
    async fn get_token(&self, token: &str) -> Result<Option<RefreshTokenModel>, AppError>;
    /// Stamps revoked_at on the row. Returns whether a row existed.
    async fn revoke_token(&self, token: &str) -> Result<bool, AppError>;
}

/// In-memory implementation of RefreshTokenRepository for development and
/// testing. Data is lost when the application restarts.
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<String, RefreshTokenModel>>,
}

impl Default for InMemoryRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of stored tokens
    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    #[instrument(skip(self, token))]
    async fn create_token(&self, token: &RefreshTokenModel) -> Result<(), AppError> {
        debug!(user_id = %token.user_id, "Storing refresh token in memory");

        let mut tokens = self.tokens.lock().unwrap();
        if tokens.contains_key(&token.token) {
            warn!("Refresh token collision in memory");
            return Err(AppError::Database("token already exists".to_string()));
        }
        tokens.insert(token.token.clone(), token.clone());

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_token(&self, token: &str) -> Result<Option<RefreshTokenModel>, AppError> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens.get(token).cloned())
    }

    #[instrument(skip(self, token))]
    async fn revoke_token(&self, token: &str) -> Result<bool, AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(token) {
            Some(record) => {
                let now = Utc::now();
                record.revoked_at = Some(now);
                record.updated_at = now;
                debug!(user_id = %record.user_id, "Refresh token revoked in memory");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// PostgreSQL implementation of the refresh token repository
pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    #[instrument(skip(self, token))]
    async fn create_token(&self, token: &RefreshTokenModel) -> Result<(), AppError> {
        debug!(user_id = %token.user_id, "Storing refresh token in database");

        sqlx::query(
            "INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at, revoked_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&token.token)
        .bind(token.user_id)
        .bind(token.created_at)
        .bind(token.updated_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to store refresh token in database");
            AppError::Database(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_token(&self, token: &str) -> Result<Option<RefreshTokenModel>, AppError> {
        let row = sqlx::query(
            "SELECT token, user_id, created_at, updated_at, expires_at, revoked_at \
             FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch refresh token from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.map(|row| RefreshTokenModel {
            token: row.get("token"),
            user_id: row.get("user_id"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            expires_at: row.get("expires_at"),
            revoked_at: row.get("revoked_at"),
        }))
    }

    #[instrument(skip(self, token))]
    async fn revoke_token(&self, token: &str) -> Result<bool, AppError> {
        let now = Utc::now();
        let result =
            sqlx::query("UPDATE refresh_tokens SET revoked_at = $2, updated_at = $2 WHERE token = $1")
                .bind(token)
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to revoke refresh token in database");
                    AppError::Database(e.to_string())
                })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_and_get_token() {
        let repo = InMemoryRefreshTokenRepository::new();
        let token = RefreshTokenModel::new(Uuid::new_v4());

        repo.create_token(&token).await.unwrap();

        let stored = repo.get_token(&token.token).await.unwrap().unwrap();
        assert_eq!(stored.user_id, token.user_id);
        assert!(stored.revoked_at.is_none());
    }

    #[tokio::test]
    async fn test_get_nonexistent_token() {
        let repo = InMemoryRefreshTokenRepository::new();
        let result = repo.get_token("nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_revoke_token() {
        let repo = InMemoryRefreshTokenRepository::new();
        let token = RefreshTokenModel::new(Uuid::new_v4());
        repo.create_token(&token).await.unwrap();

        let existed = repo.revoke_token(&token.token).await.unwrap();
        assert!(existed);

        let stored = repo.get_token(&token.token).await.unwrap().unwrap();
        assert!(stored.revoked_at.is_some());
        // The row survives revocation
        assert_eq!(repo.token_count(), 1);
    }

    #[tokio::test]
    async fn test_revoke_nonexistent_token() {
        let repo = InMemoryRefreshTokenRepository::new();
        let existed = repo.revoke_token("nonexistent").await.unwrap();
        assert!(!existed);
    }
}

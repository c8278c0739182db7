use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{models::UserModel, repository::UserRepository};
use crate::auth;
use crate::shared::AppError;

/// Service for handling user business logic
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
        if !email.contains('@') {
            return Err(AppError::Validation("invalid email".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Registers a new user with a hashed password
    #[instrument(skip(self, email, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<UserModel, AppError> {
        Self::validate_credentials(email, password)?;

        let hashed_password = auth::hash_password(password)?;
        let user = UserModel::new(email.to_string(), hashed_password);

        self.repository.create_user(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Checks an email/password pair against the stored credentials.
    ///
    /// An unknown email is NotFound; a wrong password is Unauthenticated.
    #[instrument(skip(self, email, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserModel, AppError> {
        let user = self
            .repository
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        if !auth::verify_password(password, &user.hashed_password) {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::Unauthenticated);
        }

        info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    /// Replaces the caller's email and password
    #[instrument(skip(self, email, password))]
    pub async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<UserModel, AppError> {
        Self::validate_credentials(email, password)?;

        let mut user = self
            .repository
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        user.email = email.to_string();
        user.hashed_password = auth::hash_password(password)?;
        user.updated_at = chrono::Utc::now();

        self.repository.update_user(&user).await?;

        info!(user_id = %user.id, "User credentials updated");
        Ok(user)
    }

    /// Flags a user as a Chirpy Red (paid tier) member
    #[instrument(skip(self))]
    pub async fn upgrade_to_chirpy_red(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut user = self
            .repository
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        user.is_chirpy_red = true;
        user.updated_at = chrono::Utc::now();

        self.repository.update_user(&user).await?;

        info!(user_id = %user.id, "User upgraded to Chirpy Red");
        Ok(())
    }

    /// Deletes every user. Only reachable through the gated admin reset.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<u64, AppError> {
        let removed = self.repository.delete_all_users().await?;
        info!(users_removed = removed, "User store reset");
        Ok(removed)
    }
}

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
    async fn update_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn delete_all_users(&self) -> Result<u64, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of users in the repository
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, email = %user.email, "Creating user in memory");

        let mut users = self.users.lock().unwrap();
        // The email column carries a unique constraint in Postgres
        if users.values().any(|u| u.email == user.email) {
            warn!(email = %user.email, "User email already exists in memory");
            return Err(AppError::Database("user email already exists".to_string()));
        }
        users.insert(user.id, user.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).cloned())
    }

    #[instrument(skip(self, email))]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    #[instrument(skip(self, user))]
    async fn update_user(&self, user: &UserModel) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            warn!(user_id = %user.id, "User not found for update in memory");
            return Err(AppError::NotFound("user not found".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all_users(&self) -> Result<u64, AppError> {
        let mut users = self.users.lock().unwrap();
        let removed = users.len() as u64;
        users.clear();
        debug!(users_removed = removed, "Deleted all users from memory");
        Ok(removed)
    }
}

/// PostgreSQL implementation of the user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::postgres::PgRow) -> UserModel {
        UserModel {
            id: row.get("id"),
            email: row.get("email"),
            hashed_password: row.get("hashed_password"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            is_chirpy_red: row.get("is_chirpy_red"),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, email = %user.email, "Creating user in database");

        sqlx::query(
            "INSERT INTO users (id, email, hashed_password, created_at, updated_at, is_chirpy_red) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.is_chirpy_red)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create user in database");
            AppError::Database(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, hashed_password, created_at, updated_at, is_chirpy_red \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %id, "Failed to fetch user from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    #[instrument(skip(self, email))]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, hashed_password, created_at, updated_at, is_chirpy_red \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user by email from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    #[instrument(skip(self, user))]
    async fn update_user(&self, user: &UserModel) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET email = $2, hashed_password = $3, updated_at = $4, is_chirpy_red = $5 \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.updated_at)
        .bind(user.is_chirpy_red)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user.id, "Failed to update user in database");
            AppError::Database(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(user_id = %user.id, "User not found for update");
            return Err(AppError::NotFound("user not found".to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all_users(&self) -> Result<u64, AppError> {
        // refresh_tokens and chirps cascade
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete users from database");
                AppError::Database(e.to_string())
            })?;

        debug!(
            users_removed = result.rows_affected(),
            "Deleted all users from database"
        );
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn test_user(email: &str) -> UserModel {
        UserModel::new(email.to_string(), "$argon2id$test-hash".to_string())
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();
        let user = test_user("a@example.com");

        repo.create_user(&user).await.unwrap();

        let by_id = repo.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");

        let by_email = repo.get_user_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_get_nonexistent_user() {
        let repo = InMemoryUserRepository::new();

        assert!(repo.get_user_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo
            .get_user_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&test_user("a@example.com")).await.unwrap();

        let result = repo.create_user(&test_user("a@example.com")).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_user() {
        let repo = InMemoryUserRepository::new();
        let mut user = test_user("a@example.com");
        repo.create_user(&user).await.unwrap();

        user.email = "b@example.com".to_string();
        user.is_chirpy_red = true;
        repo.update_user(&user).await.unwrap();

        let updated = repo.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(updated.email, "b@example.com");
        assert!(updated.is_chirpy_red);
    }

    #[tokio::test]
    async fn test_update_nonexistent_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update_user(&test_user("a@example.com")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_all_users() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&test_user("a@example.com")).await.unwrap();
        repo.create_user(&test_user("b@example.com")).await.unwrap();

        let removed = repo.delete_all_users().await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.user_count(), 0);
    }
}

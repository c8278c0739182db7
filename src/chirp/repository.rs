use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::ChirpModel;
use crate::shared::AppError;

/// Trait for chirp repository operations
#[async_trait]
pub trait ChirpRepository {
    async fn create_chirp(&self, chirp: &ChirpModel) -> Result<(), AppError>;
    async fn get_chirp(&self, id: Uuid) -> Result<Option<ChirpModel>, AppError>;
    /// Lists all chirps ordered by creation time, oldest first
    async fn list_chirps(&self) -> Result<Vec<ChirpModel>, AppError>;
    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError>;
}

/// In-memory implementation of ChirpRepository for development and testing
pub struct InMemoryChirpRepository {
    chirps: Mutex<HashMap<Uuid, ChirpModel>>,
}

impl Default for InMemoryChirpRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChirpRepository {
    pub fn new() -> Self {
        Self {
            chirps: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    #[instrument(skip(self, chirp))]
    async fn create_chirp(&self, chirp: &ChirpModel) -> Result<(), AppError> {
        debug!(chirp_id = %chirp.id, user_id = %chirp.user_id, "Creating chirp in memory");

        let mut chirps = self.chirps.lock().unwrap();
        chirps.insert(chirp.id, chirp.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_chirp(&self, id: Uuid) -> Result<Option<ChirpModel>, AppError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_chirps(&self) -> Result<Vec<ChirpModel>, AppError> {
        let chirps = self.chirps.lock().unwrap();
        let mut all: Vec<ChirpModel> = chirps.values().cloned().collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError> {
        let mut chirps = self.chirps.lock().unwrap();
        if chirps.remove(&id).is_none() {
            warn!(chirp_id = %id, "Chirp not found for deletion in memory");
            return Err(AppError::NotFound("chirp not found".to_string()));
        }
        Ok(())
    }
}

/// PostgreSQL implementation of the chirp repository
pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_chirp(row: &sqlx::postgres::PgRow) -> ChirpModel {
        ChirpModel {
            id: row.get("id"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            body: row.get("body"),
            user_id: row.get("user_id"),
        }
    }
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    #[instrument(skip(self, chirp))]
    async fn create_chirp(&self, chirp: &ChirpModel) -> Result<(), AppError> {
        debug!(chirp_id = %chirp.id, user_id = %chirp.user_id, "Creating chirp in database");

        sqlx::query(
            "INSERT INTO chirps (id, created_at, updated_at, body, user_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(chirp.id)
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .bind(&chirp.body)
        .bind(chirp.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create chirp in database");
            AppError::Database(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_chirp(&self, id: Uuid) -> Result<Option<ChirpModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, chirp_id = %id, "Failed to fetch chirp from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_chirp))
    }

    #[instrument(skip(self))]
    async fn list_chirps(&self) -> Result<Vec<ChirpModel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps \
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list chirps from database");
            AppError::Database(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_chirp).collect())
    }

    #[instrument(skip(self))]
    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, chirp_id = %id, "Failed to delete chirp from database");
                AppError::Database(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(chirp_id = %id, "Chirp not found for deletion");
            return Err(AppError::NotFound("chirp not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_chirp() {
        let repo = InMemoryChirpRepository::new();
        let chirp = ChirpModel::new("hello".to_string(), Uuid::new_v4());

        repo.create_chirp(&chirp).await.unwrap();

        let stored = repo.get_chirp(chirp.id).await.unwrap().unwrap();
        assert_eq!(stored.body, "hello");
        assert_eq!(stored.user_id, chirp.user_id);
    }

    #[tokio::test]
    async fn test_list_chirps_ordered_by_creation() {
        let repo = InMemoryChirpRepository::new();
        let author = Uuid::new_v4();

        let mut first = ChirpModel::new("first".to_string(), author);
        let mut second = ChirpModel::new("second".to_string(), author);
        first.created_at = chrono::Utc::now() - chrono::Duration::minutes(2);
        second.created_at = chrono::Utc::now() - chrono::Duration::minutes(1);

        // Insert newest first to prove ordering comes from timestamps
        repo.create_chirp(&second).await.unwrap();
        repo.create_chirp(&first).await.unwrap();

        let chirps = repo.list_chirps().await.unwrap();
        assert_eq!(chirps.len(), 2);
        assert_eq!(chirps[0].body, "first");
        assert_eq!(chirps[1].body, "second");
    }

    #[tokio::test]
    async fn test_delete_chirp() {
        let repo = InMemoryChirpRepository::new();
        let chirp = ChirpModel::new("bye".to_string(), Uuid::new_v4());
        repo.create_chirp(&chirp).await.unwrap();

        repo.delete_chirp(chirp.id).await.unwrap();
        assert!(repo.get_chirp(chirp.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_chirp() {
        let repo = InMemoryChirpRepository::new();
        let result = repo.delete_chirp(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

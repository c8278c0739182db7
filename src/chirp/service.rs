use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    models::ChirpModel,
    profanity,
    repository::ChirpRepository,
    types::SortOrder,
};
use crate::shared::AppError;

/// Longest chirp body accepted, in characters
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Service for handling chirp business logic
pub struct ChirpService {
    repository: Arc<dyn ChirpRepository + Send + Sync>,
}

impl ChirpService {
    pub fn new(repository: Arc<dyn ChirpRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Validates, filters and stores a new chirp for the given author
    #[instrument(skip(self, body))]
    pub async fn create_chirp(&self, author_id: Uuid, body: &str) -> Result<ChirpModel, AppError> {
        if body.chars().count() > MAX_CHIRP_LENGTH {
            return Err(AppError::Validation("Chirp is too long".to_string()));
        }

        let chirp = ChirpModel::new(profanity::clean(body), author_id);
        self.repository.create_chirp(&chirp).await?;

        info!(chirp_id = %chirp.id, user_id = %author_id, "Chirp created");
        Ok(chirp)
    }

    #[instrument(skip(self))]
    pub async fn get_chirp(&self, id: Uuid) -> Result<ChirpModel, AppError> {
        self.repository
            .get_chirp(id)
            .await?
            .ok_or_else(|| AppError::NotFound("chirp not found".to_string()))
    }

    /// Lists chirps, optionally restricted to one author, oldest first
    /// unless descending order is requested
    #[instrument(skip(self))]
    pub async fn list_chirps(
        &self,
        author_id: Option<Uuid>,
        sort: SortOrder,
    ) -> Result<Vec<ChirpModel>, AppError> {
        let mut chirps = self.repository.list_chirps().await?;

        if let Some(author_id) = author_id {
            chirps.retain(|c| c.user_id == author_id);
        }
        if sort == SortOrder::Desc {
            chirps.reverse();
        }

        Ok(chirps)
    }

    /// Deletes a chirp on behalf of the requester.
    ///
    /// Only the author may delete: a mismatched requester gets Forbidden,
    /// regardless of whether they are otherwise authenticated.
    #[instrument(skip(self))]
    pub async fn delete_chirp(&self, id: Uuid, requester_id: Uuid) -> Result<(), AppError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != requester_id {
            warn!(
                chirp_id = %id,
                owner_id = %chirp.user_id,
                requester_id = %requester_id,
                "Refusing to delete chirp owned by another user"
            );
            return Err(AppError::Forbidden);
        }

        self.repository.delete_chirp(id).await?;

        info!(chirp_id = %id, "Chirp deleted");
        Ok(())
    }
}

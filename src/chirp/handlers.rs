use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    service::ChirpService,
    types::{ChirpResponse, CreateChirpRequest, ListChirpsQuery},
};
use crate::auth::AuthUser;
use crate::shared::{AppError, AppState};

/// HTTP handler for posting a chirp
///
/// POST /api/chirps (requires a valid access token)
#[instrument(name = "create_chirp", skip(state, request))]
pub async fn create_chirp(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>), AppError> {
    let service = ChirpService::new(Arc::clone(&state.chirp_repository));
    let chirp = service.create_chirp(user_id, &request.body).await?;

    info!(chirp_id = %chirp.id, "Chirp created successfully");

    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// HTTP handler for listing chirps
///
/// GET /api/chirps?author_id=<uuid>&sort=asc|desc
#[instrument(name = "list_chirps", skip(state))]
pub async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<Json<Vec<ChirpResponse>>, AppError> {
    let service = ChirpService::new(Arc::clone(&state.chirp_repository));
    let chirps = service
        .list_chirps(query.author_id, query.sort.unwrap_or_default())
        .await?;

    Ok(Json(chirps.into_iter().map(Into::into).collect()))
}

/// HTTP handler for fetching a single chirp
///
/// GET /api/chirps/{chirp_id}
#[instrument(name = "get_chirp", skip(state))]
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
) -> Result<Json<ChirpResponse>, AppError> {
    let service = ChirpService::new(Arc::clone(&state.chirp_repository));
    let chirp = service.get_chirp(chirp_id).await?;

    Ok(Json(chirp.into()))
}

/// HTTP handler for deleting a chirp
///
/// DELETE /api/chirps/{chirp_id} (requires a valid access token; only the
/// author may delete)
#[instrument(name = "delete_chirp", skip(state))]
pub async fn delete_chirp(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(chirp_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = ChirpService::new(Arc::clone(&state.chirp_repository));
    service.delete_chirp(chirp_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

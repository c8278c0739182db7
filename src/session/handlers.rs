use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use std::sync::Arc;
use tracing::instrument;

use super::{service::SessionService, types::RefreshResponse};
use crate::auth;
use crate::shared::{AppError, AppState};

/// HTTP handler for exchanging a refresh token for a new access token
///
/// POST /api/refresh
/// The bearer credential here is the opaque refresh token, not a JWT.
#[instrument(name = "refresh", skip(state, headers))]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh_token = auth::bearer_token(&headers)?;

    let service = SessionService::new(
        Arc::clone(&state.refresh_token_repository),
        state.token_config.clone(),
    );
    let token = service.exchange_for_access_token(refresh_token).await?;

    Ok(Json(RefreshResponse { token }))
}

/// HTTP handler for revoking a refresh token
///
/// POST /api/revoke
/// Returns 204 whether or not the token was known; revocation is idempotent.
#[instrument(name = "revoke", skip(state, headers))]
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let refresh_token = auth::bearer_token(&headers)?;

    let service = SessionService::new(
        Arc::clone(&state.refresh_token_repository),
        state.token_config.clone(),
    );
    service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}

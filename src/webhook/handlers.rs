use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::types::WebhookRequest;
use crate::auth;
use crate::shared::{AppError, AppState};
use crate::user::UserService;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// HTTP handler for the billing provider's webhook
///
/// POST /api/polka/webhooks
/// Authenticated by the static API key; events other than user.upgraded
/// are acknowledged without any state change.
#[instrument(name = "polka_webhook", skip(state, headers, request))]
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<WebhookRequest>,
) -> Result<StatusCode, AppError> {
    let key = auth::api_key(&headers)?;
    if key != state.polka_key {
        warn!("Webhook called with wrong API key");
        return Err(AppError::Unauthenticated);
    }

    if request.event != USER_UPGRADED_EVENT {
        debug!(event = %request.event, "Ignoring unrecognized webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let data = request
        .data
        .ok_or_else(|| AppError::Validation("missing event data".to_string()))?;

    let service = UserService::new(Arc::clone(&state.user_repository));
    service.upgrade_to_chirpy_red(data.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

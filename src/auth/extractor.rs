use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::headers;
use crate::shared::{AppError, AppState};

/// Extractor that authenticates the request and provides the caller's
/// user id. Add it as a handler argument to protect a route:
///
/// ```ignore
/// async fn my_handler(AuthUser(user_id): AuthUser) -> impl IntoResponse {
///     // user_id is the validated token subject
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = headers::bearer_token(&parts.headers).map_err(|e| {
            warn!(uri = %parts.uri, "Request without usable bearer credential");
            e
        })?;

        let user_id = state.token_config.validate(token).map_err(|e| {
            warn!(uri = %parts.uri, "Bearer token failed validation");
            e
        })?;

        Ok(AuthUser(user_id))
    }
}

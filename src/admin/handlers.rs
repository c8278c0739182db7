use axum::{extract::State, http::StatusCode, response::Html};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::Platform;
use crate::shared::{AppError, AppState};
use crate::user::UserService;

/// HTTP handler for the admin metrics page
///
/// GET /admin/metrics
#[instrument(name = "metrics_page", skip(state))]
pub async fn metrics_page(State(state): State<AppState>) -> Html<String> {
    let hits = state.hits.read();

    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    \
         <p>Chirpy has been visited {hits} times!</p>\n  </body>\n</html>"
    ))
}

/// HTTP handler for the destructive admin reset
///
/// POST /admin/reset
/// Deletes every user (dependent rows cascade) and zeroes the hit counter.
/// Refused outright unless the server runs in Development mode.
#[instrument(name = "reset", skip(state))]
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.platform != Platform::Development {
        warn!("Reset requested outside Development mode");
        return Err(AppError::Forbidden);
    }

    let service = UserService::new(Arc::clone(&state.user_repository));
    let removed = service.reset().await?;
    state.hits.reset();

    info!(users_removed = removed, "Admin reset completed");
    Ok(StatusCode::OK)
}

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::shared::AppState;
use crate::{admin, chirp, session, user, webhook};

/// GET /api/healthz
async fn healthz() -> &'static str {
    "OK"
}

/// Assembles the full application router.
///
/// The hit counter rides in on the state; only the /app fileserver routes
/// pass through the counting layer.
pub fn build_router(state: AppState) -> Router {
    let fileserver = Router::new()
        .nest_service("/app", ServeDir::new("."))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin::count_hits,
        ));

    Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(user::create_user).put(user::update_user))
        .route("/api/login", post(user::login))
        .route("/api/refresh", post(session::refresh))
        .route("/api/revoke", post(session::revoke))
        .route(
            "/api/chirps",
            post(chirp::create_chirp).get(chirp::list_chirps),
        )
        .route(
            "/api/chirps/:chirp_id",
            get(chirp::get_chirp).delete(chirp::delete_chirp),
        )
        .route("/api/polka/webhooks", post(webhook::polka_webhook))
        .route("/admin/metrics", get(admin::metrics_page))
        .route("/admin/reset", post(admin::reset))
        .merge(fileserver)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

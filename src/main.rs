use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chirpy::chirp::repository::PostgresChirpRepository;
use chirpy::config::Config;
use chirpy::session::repository::PostgresRefreshTokenRepository;
use chirpy::user::repository::PostgresUserRepository;
use chirpy::{build_router, AppState, TokenConfig};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Chirpy server");

    // Environment is read exactly once, here
    let config = Config::from_env();

    let pool = sqlx::PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let app_state = AppState::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresRefreshTokenRepository::new(pool.clone())),
        Arc::new(PostgresChirpRepository::new(pool)),
        TokenConfig::new(config.jwt_secret.clone(), config.access_token_ttl),
        config.platform,
        config.polka_key.clone(),
    );

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    info!("Server running on http://localhost:8080");
    axum::serve(listener, app).await.unwrap();
}

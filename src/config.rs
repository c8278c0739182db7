use chrono::Duration;

/// Which mode the server was started in. Development unlocks destructive
/// admin operations (the /admin/reset endpoint); Production refuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Development,
    Production,
}

impl Platform {
    /// Parses the PLATFORM environment value. Anything that is not
    /// explicitly a development marker is treated as Production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Platform::Development,
            _ => Platform::Production,
        }
    }
}

/// Environment configuration, resolved once at startup and threaded into
/// the application state. Handlers never read the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub platform: Platform,
    pub jwt_secret: String,
    pub polka_key: String,
    pub access_token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let access_token_ttl_seconds = std::env::var("ACCESS_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            platform: std::env::var("PLATFORM")
                .map(|value| Platform::parse(&value))
                .unwrap_or(Platform::Production),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            polka_key: std::env::var("POLKA_KEY").expect("POLKA_KEY must be set"),
            access_token_ttl: Duration::seconds(access_token_ttl_seconds),
        }
    }
}

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How long a refresh token stays valid after issuance
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Generates an opaque refresh token: 32 bytes of OS entropy, hex-encoded
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Database model for the refresh_tokens table.
///
/// The token string is the primary lookup key. Revocation is a timestamp,
/// not a delete, so a revoked token stays on record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RefreshTokenModel {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenModel {
    /// Creates a new refresh token bound to the given user
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();

        Self {
            token: generate_token(),
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            revoked_at: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// A token is usable only while unexpired and unrevoked
    pub fn is_usable(&self) -> bool {
        !self.is_expired() && !self.is_revoked()
    }
}

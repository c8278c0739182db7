use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::shared::AppError;

/// Issuer claim stamped into every access token
const ISSUER: &str = "chirpy";

/// Registered claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub iss: String,
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Configuration for access token operations.
///
/// Access tokens are stateless: validation is purely computational, so they
/// cannot be revoked before expiry. The short TTL bounds that window.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issues a signed access token asserting the given user as subject
    #[instrument(skip(self, user_id))]
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        debug!(
            sub = %claims.sub,
            exp = claims.exp,
            "Issuing access token"
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            AppError::Internal
        })
    }

    /// Validates an access token and returns the subject user id.
    ///
    /// Fails with Unauthenticated on a bad signature, a malformed token, a
    /// passed expiry, or a subject that is not a valid user id. No store
    /// lookup happens here.
    #[instrument(skip(self, token))]
    pub fn validate(&self, token: &str) -> Result<Uuid, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);

        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            debug!(error = %e, "Access token failed validation");
            AppError::Unauthenticated
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|e| {
            debug!(error = %e, sub = %data.claims.sub, "Access token subject is not a user id");
            AppError::Unauthenticated
        })
    }
}

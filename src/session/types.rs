use serde::{Deserialize, Serialize};

/// Response for a successful refresh-token exchange
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String, // PHC string, never the plaintext
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_chirpy_red: bool,
}

impl UserModel {
    /// Creates a new user model with a generated id and timestamps
    pub fn new(email: String, hashed_password: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            hashed_password,
            created_at: now,
            updated_at: now,
            is_chirpy_red: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_model() {
        let user = UserModel::new("a@example.com".to_string(), "$argon2id$hash".to_string());

        assert_eq!(user.email, "a@example.com");
        assert!(!user.id.is_nil());
        assert!(!user.is_chirpy_red);
        assert_eq!(user.created_at, user.updated_at);
    }
}

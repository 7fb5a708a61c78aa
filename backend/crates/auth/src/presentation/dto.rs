//! API DTOs (Data Transfer Objects)
//!
//! Wire format uses snake_case field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::User;

/// Minimum password length accepted at registration
pub const PASSWORD_MIN_LENGTH: usize = 6;

// ============================================================================
// Requests
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user; never includes the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Register/login success envelope
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub message: String,
}

/// Plain message envelope (logout, logout-all)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::Email;
    use platform::password::{ClearTextPassword, HashedPassword};

    #[test]
    fn test_user_response_fields() {
        let hash =
            HashedPassword::from_clear_text(&ClearTextPassword::new("secret1".into())).unwrap();
        let user = User::new(Email::new("alice@example.com").unwrap(), hash);

        let resp = UserResponse::from(&user);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["id"], user.id.to_string());
        assert!(json.get("created_at").is_some());
        assert!(json.get("password_hash").is_none());
    }
}

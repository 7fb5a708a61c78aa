//! User Entity

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, UserId};

/// User entity
///
/// Immutable after creation; there is no profile-edit or password-reset
/// flow in this service.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub id: UserId,
    /// Unique login key, stored case-sensitively
    pub email: Email,
    /// Argon2id PHC string; never logged or serialized to clients
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID
    pub fn new(email: Email, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

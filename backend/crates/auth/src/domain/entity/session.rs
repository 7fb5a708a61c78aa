//! Session Entity
//!
//! A server-side session referenced by an opaque bearer token held in the
//! client's cookie. Valid iff it exists in the store and has not passed
//! `expires_at`; an expired session is indistinguishable from a deleted one
//! at resolution time.

use chrono::{DateTime, Duration, Utc};
use platform::token::SessionToken;

use crate::domain::value_object::UserId;

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token; the sole credential for resolving this session
    pub token: SessionToken,
    /// Owning user (weak reference for lookup)
    pub user_id: UserId,
    /// Absolute expiry, set once at creation
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session expiring `ttl` from now
    pub fn new(user_id: UserId, token: SessionToken, ttl: Duration) -> Self {
        Self {
            token,
            user_id,
            expires_at: Utc::now() + ttl,
        }
    }

    /// Check if the session has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

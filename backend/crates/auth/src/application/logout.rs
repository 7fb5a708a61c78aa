//! Logout Use Case
//!
//! Revokes sessions: one token, or everything a user owns.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::UserId;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Revoke the single session matching `token`. Idempotent: a token
    /// that was already logged out is not an error.
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        self.session_repo.delete_by_token(token).await?;

        tracing::debug!("Session revoked");
        Ok(())
    }

    /// Revoke every session for `user_id` ("sign out everywhere")
    pub async fn execute_all(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = self.session_repo.delete_all_for_user(user_id).await?;

        tracing::info!(user_id = %user_id, sessions_deleted = deleted, "All sessions revoked");
        Ok(deleted)
    }
}

//! Resolve Session Use Case
//!
//! Maps a bearer token to its owning user. Invoked on every protected
//! request, so it is a single indexed store lookup.

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> ResolveSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Resolve `token` to a user.
    ///
    /// An expired session and a missing session both produce
    /// `SessionInvalid`; callers cannot tell them apart.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        self.session_repo
            .find_user_by_token(token)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }
}

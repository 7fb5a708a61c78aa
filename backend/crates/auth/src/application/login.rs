//! Login Use Case
//!
//! Verifies credentials and issues a new session.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::SessionToken;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Session, User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Email,
    pub password: ClearTextPassword,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    /// Opaque token for the session cookie
    pub session_token: String,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Unknown email and wrong password must be indistinguishable
        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&input.password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = SessionToken::generate()?;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        // Each login gets its own session; earlier sessions stay valid
        // (multi-device support)
        let session = Session::new(user.id, token.clone(), ttl);
        self.session_repo.create_session(&session).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            user,
            session_token: token.into_string(),
        })
    }
}

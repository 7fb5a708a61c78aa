//! Repository Traits
//!
//! Interfaces for the credential store. Implementation is in the
//! infrastructure layer; tests provide an in-memory one.

use crate::domain::entity::{Session, User};
use crate::domain::value_object::{Email, UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// The store's unique constraint on email is the source of truth for
    /// duplicate registrations; a constraint violation must surface as
    /// `AuthError::UserExists`.
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    /// Find user by email (exact, case-sensitive match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Persist a new session
    async fn create_session(&self, session: &Session) -> AuthResult<()>;

    /// Resolve a token to its owning user in a single indexed lookup.
    ///
    /// Applies the validity rule: a session past its expiry is treated
    /// exactly like a missing one and yields `None`.
    async fn find_user_by_token(&self, token: &str) -> AuthResult<Option<User>>;

    /// Delete the session matching `token`; deleting a token that does not
    /// exist is a no-op, not an error
    async fn delete_by_token(&self, token: &str) -> AuthResult<()>;

    /// Delete every session belonging to `user_id`, returning the count
    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Bulk-delete sessions past their expiry, returning the count.
    /// Idempotent and safe to run concurrently with live traffic.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

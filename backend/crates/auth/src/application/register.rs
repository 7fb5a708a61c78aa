//! Register Use Case
//!
//! Creates a new user account. No session is issued on registration.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Register input; structural validation happened in the presentation layer
pub struct RegisterInput {
    pub email: Email,
    pub password: ClearTextPassword,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        // Fast-path duplicate check. Two concurrent registrations can both
        // pass it; the unique constraint on email settles the race and the
        // infra layer reports the losing insert as UserExists.
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        let password_hash = HashedPassword::from_clear_text(&input.password)?;

        let user = User::new(input.email, password_hash);
        self.user_repo.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }
}

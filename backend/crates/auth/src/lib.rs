//! Auth (Authentication) Backend Module
//!
//! Session-based authentication core for the expense tracker backend.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application config
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Registration with email + password
//! - Opaque, unguessable session tokens in an HttpOnly cookie
//! - Multi-device sessions; single and bulk revocation
//! - Lazy session expiry plus a periodic cleanup sweep
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; plaintext zeroized after use
//! - Login never reveals whether an email is registered
//! - Session tokens carry 256 bits of OS entropy
//! - Protected routes fail closed: no valid cookie, no handler

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::CurrentUser;
pub use presentation::router::auth_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

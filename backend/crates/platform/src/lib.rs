//! Platform - Authentication primitives
//!
//! Domain-agnostic building blocks used by the auth crate:
//! - `password` - Argon2id hashing and verification
//! - `token` - opaque session token generation
//! - `cookie` - session cookie construction and parsing

pub mod cookie;
pub mod password;
pub mod token;

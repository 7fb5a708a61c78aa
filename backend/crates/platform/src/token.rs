//! Session Token Generation
//!
//! Opaque bearer tokens: 32 bytes from the OS CSPRNG, hex-encoded to a
//! fixed 64-character string. Entropy alone guarantees uniqueness
//! (collision probability ~2^-256); no store-side uniqueness check is made.

use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;

/// Raw entropy per token, in bytes
const TOKEN_BYTES: usize = 32;

/// Encoded token length in characters
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

#[derive(Debug, Error)]
pub enum TokenError {
    /// The OS random source could not produce bytes; no session can be
    /// issued in this state.
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Opaque session token, 64 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token from the OS CSPRNG
    pub fn generate() -> Result<Self, TokenError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::EntropyUnavailable(e.to_string()))?;

        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

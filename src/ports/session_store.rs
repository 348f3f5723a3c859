//! Server-side login session store port.
//!
//! Sessions are identified by an opaque random token that lives only in the
//! client's cookie. Stores keep a digest of the token, never the token itself.

use async_trait::async_trait;
use chrono::Duration;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::foundation::{DomainError, UserId};

/// Bytes of entropy in a session token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Persistence for login sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for a user, returning the plaintext token.
    async fn create(&self, user_id: &UserId, ttl: Duration) -> Result<String, DomainError>;

    /// Resolve a token to its user, `None` if unknown or expired.
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, DomainError>;

    /// End a session. Unknown tokens are ignored.
    async fn revoke(&self, token: &str) -> Result<(), DomainError>;

    /// Drop expired sessions, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}

/// Generates a fresh hex-encoded session token.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest under which a token is stored.
pub fn session_token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }

    #[test]
    fn generated_tokens_are_unique_hex() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), SESSION_TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn digest_is_stable_and_differs_from_token() {
        let token = generate_session_token();
        assert_eq!(session_token_digest(&token), session_token_digest(&token));
        assert_ne!(session_token_digest(&token), token);
    }
}

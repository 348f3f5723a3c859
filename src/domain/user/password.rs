//! Password hashing.
//!
//! bcrypt is CPU bound, so both operations hop onto the blocking pool.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Lowest cost bcrypt accepts; handy for tests.
pub const MIN_BCRYPT_COST: u32 = 4;

/// A bcrypt password hash as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a plaintext password with the given bcrypt cost.
    pub async fn hash(password: &SecretString, cost: u32) -> Result<Self, DomainError> {
        let password = password.expose_secret().clone();
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hash task failed: {}", e)))?
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Failed to hash password: {}", e))
            })?;
        Ok(Self(hashed))
    }

    /// Wraps a hash loaded from storage.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Checks a plaintext password against this hash.
    ///
    /// Malformed stored hashes verify as `false` rather than erroring.
    pub async fn verify(&self, password: &SecretString) -> bool {
        let password = password.expose_secret().clone();
        let hash = self.0.clone();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

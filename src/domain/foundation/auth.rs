//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the session middleware injects into request
//! extensions once a session cookie has been resolved. It carries only the
//! fields the API echoes back to the client.

use serde::Serialize;
use thiserror::Error;

use super::UserId;

/// User resolved from a valid session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// Lowercased email address.
    pub email: String,

    /// Display name chosen at signup.
    pub username: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            username: username.into(),
        }
    }
}

/// Errors that can occur while resolving a session token.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is unknown or malformed.
    #[error("Invalid session")]
    InvalidSession,

    /// The session points at a user that no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The session store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should simply be treated as anonymous.
    pub fn is_anonymous(&self) -> bool {
        !matches!(self, AuthError::ServiceUnavailable(_))
    }
}

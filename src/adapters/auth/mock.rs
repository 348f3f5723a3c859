//! Mock session validator for testing.
//!
//! Maps fixed tokens to users so HTTP tests can authenticate without a
//! session store or a user table.
//!
//! # Example
//!
//! ```ignore
//! use planboard::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidSession`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a user whose email and username derive from the id.
    ///
    /// Ids that are not valid `UserId`s are skipped.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        match UserId::new(user_id.as_str()) {
            Ok(id) => {
                let user = AuthenticatedUser::new(
                    id,
                    format!("{}@test.example.com", user_id),
                    user_id.clone(),
                );
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validates_registered_token() {
        let validator = MockSessionValidator::new().with_test_user("token", "user-1");
        let user = validator.validate("token").await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email, "user-1@test.example.com");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn removed_token_is_invalid() {
        let validator = MockSessionValidator::new().with_test_user("token", "user-1");
        validator.remove_token("token");
        assert!(validator.validate("token").await.is_err());
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("token", "user-1")
            .with_error(AuthError::service_unavailable("down"));
        assert!(matches!(
            validator.validate("token").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }
}

//! Session validation port.
//!
//! Turns the raw session cookie value into an authenticated user. The HTTP
//! middleware depends only on this trait, so tests can swap in a mock that
//! maps fixed tokens to users.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates session tokens and resolves the user behind them.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidSession` for unknown or malformed tokens
/// - Return `AuthError::UserNotFound` when the session outlived its user
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a session token and return the authenticated user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidSession)
        }
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-123").unwrap(), "test@example.com", "test")
    }

    #[tokio::test]
    async fn session_validator_returns_user_for_valid_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token("valid-token-123", test_user());

        let user = validator.validate("valid-token-123").await.unwrap();
        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn session_validator_returns_error_for_invalid_token() {
        let validator = TestSessionValidator::new();
        let result = validator.validate("invalid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}

//! Cookie session validator.
//!
//! Resolves a session token through the `SessionStore`, then loads the user
//! the session belongs to.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{SessionStore, SessionValidator, UserRepository};

/// `SessionValidator` backed by the server-side session store.
#[derive(Clone)]
pub struct StoreSessionValidator {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserRepository>,
}

impl StoreSessionValidator {
    pub fn new(sessions: Arc<dyn SessionStore>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }
}

#[async_trait]
impl SessionValidator for StoreSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let user_id = self
            .sessions
            .resolve(token)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?
            .ok_or(AuthError::InvalidSession)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.to_authenticated())
    }
}

//! LoginHandler - Command handler for password login.

use std::sync::Arc;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{normalize_email, AccountError};
use crate::ports::{SessionStore, UserRepository};

/// Command to log in with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: AuthenticatedUser,
    pub session_token: String,
    /// Lifetime of the remembered session, used as the cookie's Max-Age.
    pub expires_in: Duration,
}

/// Handler for password logins.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    remember_ttl: Duration,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        remember_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            remember_ttl,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let email = cmd.email.as_deref().map(normalize_email).unwrap_or_default();
        let password = match cmd.password {
            Some(password) if !email.is_empty() && !password.expose_secret().is_empty() => password,
            _ => return Err(AccountError::MissingFields),
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            info!("Login failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        if !user.password_hash().verify(&password).await {
            info!(user_id = %user.id(), "Login failed: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        // Expired sessions are swept here rather than by a background job
        match self.sessions.purge_expired().await {
            Ok(0) => {}
            Ok(purged) => info!(purged, "Purged expired sessions"),
            Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
        }

        let session_token = self.sessions.create(user.id(), self.remember_ttl).await?;

        info!(user_id = %user.id(), "User logged in");
        Ok(LoginResult {
            user: user.to_authenticated(),
            session_token,
            expires_in: self.remember_ttl,
        })
    }
}

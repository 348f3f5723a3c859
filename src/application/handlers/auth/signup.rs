//! SignupHandler - Command handler for account registration.
//!
//! A successful signup also logs the new user in with a session that lasts
//! for the browser session only.

use std::sync::Arc;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{normalize_email, AccountError, PasswordHash, User};
use crate::ports::{SessionStore, UserRepository};

/// Command to register a new account.
#[derive(Debug)]
pub struct SignupCommand {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct SignupResult {
    pub user: AuthenticatedUser,
    pub session_token: String,
}

/// Handler for registering accounts.
pub struct SignupHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    bcrypt_cost: u32,
    session_ttl: Duration,
}

impl SignupHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        bcrypt_cost: u32,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            bcrypt_cost,
            session_ttl,
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, AccountError> {
        let email = cmd.email.as_deref().map(normalize_email).unwrap_or_default();
        let password = match cmd.password {
            Some(password) if !email.is_empty() && !password.expose_secret().is_empty() => password,
            _ => return Err(AccountError::MissingFields),
        };

        // 1. Reject known emails before paying for a hash
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailAlreadyRegistered);
        }

        // 2. Build and persist the account
        let hash = PasswordHash::hash(&password, self.bcrypt_cost).await?;
        let user = User::register(&email, cmd.username.as_deref(), hash)?;
        self.users.create(&user).await?;

        // 3. Log the new user in
        let session_token = self.sessions.create(user.id(), self.session_ttl).await?;

        info!(user_id = %user.id(), "User registered");
        Ok(SignupResult {
            user: user.to_authenticated(),
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySessionStore, InMemoryUserRepository};
    use crate::domain::user::MIN_BCRYPT_COST;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        sessions: Arc<InMemorySessionStore>,
        handler: SignupHandler,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let handler = SignupHandler::new(
            users.clone(),
            sessions.clone(),
            MIN_BCRYPT_COST,
            Duration::hours(1),
        );
        Fixture {
            users,
            sessions,
            handler,
        }
    }

    fn command(email: Option<&str>, username: Option<&str>, password: Option<&str>) -> SignupCommand {
        SignupCommand {
            email: email.map(str::to_string),
            username: username.map(str::to_string),
            password: password.map(|p| SecretString::new(p.to_string())),
        }
    }

    #[tokio::test]
    async fn registers_user_and_opens_session() {
        let f = fixture();
        let result = f
            .handler
            .handle(command(Some(" Alice@Example.com "), Some("alice"), Some("hunter2")))
            .await
            .unwrap();

        assert_eq!(result.user.email, "alice@example.com");
        assert_eq!(result.user.username, "alice");
        assert_eq!(f.users.count().await, 1);
        assert_eq!(
            f.sessions.resolve(&result.session_token).await.unwrap(),
            Some(result.user.id.clone())
        );
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let f = fixture();
        f.handler
            .handle(command(Some("bob@example.com"), None, Some("secret")))
            .await
            .unwrap();

        let stored = f.users.find_by_email("bob@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash().as_str(), "secret");
        assert!(stored
            .password_hash()
            .verify(&SecretString::new("secret".to_string()))
            .await);
    }

    #[tokio::test]
    async fn username_defaults_to_email_local_part() {
        let f = fixture();
        let result = f
            .handler
            .handle(command(Some("carol@example.com"), Some(""), Some("pw")))
            .await
            .unwrap();
        assert_eq!(result.user.username, "carol");
    }

    #[tokio::test]
    async fn missing_email_or_password_is_missing_fields() {
        let f = fixture();
        for cmd in [
            command(None, None, Some("pw")),
            command(Some("a@b.com"), None, None),
            command(Some("   "), None, Some("pw")),
            command(Some("a@b.com"), None, Some("")),
        ] {
            assert_eq!(f.handler.handle(cmd).await.unwrap_err(), AccountError::MissingFields);
        }
        assert_eq!(f.users.count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let f = fixture();
        f.handler
            .handle(command(Some("dave@example.com"), None, Some("pw")))
            .await
            .unwrap();
        let err = f
            .handler
            .handle(command(Some("DAVE@example.com"), None, Some("pw")))
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::EmailAlreadyRegistered);
    }
}

//! User account aggregate.

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId, ValidationError};

use super::password::PasswordHash;

/// Maximum length of both email and username.
pub const MAX_IDENTITY_LEN: usize = 150;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    password_hash: PasswordHash,
    created_at: Timestamp,
}

impl User {
    /// Registers a new user.
    ///
    /// The email is normalized; an absent or blank username falls back to
    /// the local part of the email.
    pub fn register(
        email: &str,
        username: Option<&str>,
        password_hash: PasswordHash,
    ) -> Result<Self, ValidationError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if email.chars().count() > MAX_IDENTITY_LEN {
            return Err(ValidationError::too_long("email", MAX_IDENTITY_LEN));
        }

        let username = match username.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_username(&email),
        };
        if username.chars().count() > MAX_IDENTITY_LEN {
            return Err(ValidationError::too_long("username", MAX_IDENTITY_LEN));
        }

        Ok(Self {
            id: UserId::generate(),
            username,
            email,
            password_hash,
            created_at: Timestamp::now(),
        })
    }

    /// Rebuilds a user from storage.
    pub fn reconstitute(
        id: UserId,
        username: String,
        email: String,
        password_hash: PasswordHash,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Identity handed to request handlers once the user is logged in.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id.clone(), self.email.clone(), self.username.clone())
    }
}

/// Emails are compared case-insensitively by storing them lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn default_username(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

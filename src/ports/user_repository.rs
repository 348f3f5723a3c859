//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Persistence for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a newly registered user.
    ///
    /// # Errors
    ///
    /// - `EmailAlreadyRegistered` if the email is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}

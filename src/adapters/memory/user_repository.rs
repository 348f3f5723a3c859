//! In-memory user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// In-memory storage for user accounts, keyed by id
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(
                ErrorCode::EmailAlreadyRegistered,
                format!("Email already registered: {}", user.email()),
            ));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}

//! In-memory session store.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{generate_session_token, session_token_digest, SessionStore};

#[derive(Debug, Clone)]
struct StoredSession {
    user_id: UserId,
    expires_at: Timestamp,
}

/// In-memory storage for login sessions, keyed by token digest
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: &UserId, ttl: Duration) -> Result<String, DomainError> {
        let token = generate_session_token();
        let session = StoredSession {
            user_id: user_id.clone(),
            expires_at: Timestamp::now().plus(ttl),
        };
        self.sessions
            .write()
            .await
            .insert(session_token_digest(&token), session);
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<UserId>, DomainError> {
        let sessions = self.sessions.read().await;
        let now = Timestamp::now();
        Ok(sessions
            .get(&session_token_digest(token))
            .filter(|s| now.is_before(&s.expires_at))
            .map(|s| s.user_id.clone()))
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .remove(&session_token_digest(token));
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().await;
        let now = Timestamp::now();
        let before = sessions.len();
        sessions.retain(|_, s| now.is_before(&s.expires_at));
        Ok((before - sessions.len()) as u64)
    }
}

//! In-memory adapters.
//!
//! Implement the persistence ports with `tokio::sync::RwLock`-guarded maps.
//! Used by the test suites and handy for running the API without Postgres.

mod item_repository;
mod session_store;
mod user_repository;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::SchemaManager;

pub use item_repository::InMemoryItemRepository;
pub use session_store::InMemorySessionStore;
pub use user_repository::InMemoryUserRepository;

/// Schema manager for in-memory storage, which has no schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemorySchema;

#[async_trait]
impl SchemaManager for InMemorySchema {
    async fn ensure_schema(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Account storage
//! - `PostgresItemRepository` - The four planner tables
//! - `PostgresSessionStore` - Server-side login sessions
//! - `PostgresSchema` - Embedded migrations

mod item_repository;
mod schema;
mod session_store;
mod user_repository;

pub use item_repository::PostgresItemRepository;
pub use schema::PostgresSchema;
pub use session_store::PostgresSessionStore;
pub use user_repository::PostgresUserRepository;

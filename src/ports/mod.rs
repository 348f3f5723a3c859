//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Account storage
//! - `ItemRepository` - Tasks, goals, reminders and habits
//! - `SessionStore` - Server-side login sessions
//! - `SchemaManager` - Table creation on demand
//!
//! ## Authentication Ports
//!
//! - `SessionValidator` - Resolves a session cookie into a user

mod item_repository;
mod schema_manager;
mod session_store;
mod session_validator;
mod user_repository;

pub use item_repository::ItemRepository;
pub use schema_manager::SchemaManager;
pub use session_store::{
    generate_session_token, session_token_digest, SessionStore, SESSION_TOKEN_BYTES,
};
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;

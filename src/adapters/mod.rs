//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx repositories, session store and migrations
//! - `memory` - In-memory repositories for tests and database-less runs
//! - `auth` - Session validators
//! - `http` - axum routes, middleware and the SPA fallback

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use http::{app_router, AppServices};

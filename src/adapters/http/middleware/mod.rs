//! HTTP middleware for axum.
//!
//! - `auth` - Session cookie middleware and extractors

pub mod auth;

pub use auth::{
    session_middleware, AuthRejection, OptionalAuth, RequireAuth, SessionAuthState, SessionToken,
};

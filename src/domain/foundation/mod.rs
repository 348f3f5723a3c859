//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types and error types
//! used across the planner and user domains.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ItemId, UserId, ITEM_ID_MAX_LEN, USER_ID_MAX_LEN};
pub use timestamp::Timestamp;

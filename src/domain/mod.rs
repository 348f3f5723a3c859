//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth types, errors)
//! - `planner` - Tasks, goals, reminders and habits
//! - `user` - Accounts and password hashing

pub mod foundation;
pub mod planner;
pub mod user;

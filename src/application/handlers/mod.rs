//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod items;

pub use auth::{
    InitDbError, InitDbHandler, LoginCommand, LoginHandler, LoginResult, LogoutCommand,
    LogoutHandler, SignupCommand, SignupHandler, SignupResult,
};
pub use items::{
    AddItemCommand, AddItemHandler, DeleteItemCommand, DeleteItemHandler, ListItemsHandler,
    ListItemsQuery, UpdateItemCommand, UpdateItemHandler,
};

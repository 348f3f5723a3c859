//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    AddItemCommand, AddItemHandler, DeleteItemCommand, DeleteItemHandler, InitDbError,
    InitDbHandler, ListItemsHandler, ListItemsQuery, LoginCommand, LoginHandler, LoginResult,
    LogoutCommand, LogoutHandler, SignupCommand, SignupHandler, SignupResult, UpdateItemCommand,
    UpdateItemHandler,
};

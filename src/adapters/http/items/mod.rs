//! HTTP adapter for the task, goal, reminder and habit collections.

mod dto;
mod handlers;
mod routes;

pub use dto::ItemCreatedResponse;
pub use handlers::ItemHandlers;
pub use routes::item_routes;

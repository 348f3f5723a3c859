//! HTTP adapter for signup, login, logout and session checks.

mod dto;
mod handlers;
mod routes;

pub use dto::{AuthSuccessResponse, CheckAuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::AuthHandlers;
pub use routes::auth_routes;

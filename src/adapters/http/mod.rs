//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter (dto, handlers, routes); `router`
//! assembles them with the session middleware and the SPA fallback.

pub mod auth;
pub mod cookies;
pub mod dto;
pub mod items;
pub mod middleware;
pub mod router;
pub mod spa;

pub use cookies::SessionCookie;
pub use router::{app_router, AppServices};
pub use spa::SpaFallback;

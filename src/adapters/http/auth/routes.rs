//! HTTP routes for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::spa::api_not_found;

use super::handlers::{check_auth, init_db, login, logout, signup, AuthHandlers};

/// Creates the account router.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/api/signup", post(signup).fallback(api_not_found))
        .route("/api/login", post(login).fallback(api_not_found))
        .route("/api/logout", post(logout).fallback(api_not_found))
        .route("/api/check-auth", get(check_auth).fallback(api_not_found))
        .route("/api/init_db", get(init_db).fallback(api_not_found))
        .with_state(handlers)
}

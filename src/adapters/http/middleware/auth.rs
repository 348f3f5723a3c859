//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `session_middleware` - Layer that resolves the session cookie and injects the user
//! - `RequireAuth` - Extractor that requires authentication
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! ```text
//! Request → session_middleware → injects AuthenticatedUser + SessionToken into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! A missing, unknown or expired cookie is not an error here: the request
//! simply continues anonymously and each handler decides how to answer.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::cookies::SessionCookie;
use crate::adapters::http::dto::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// State for `session_middleware`.
#[derive(Clone)]
pub struct SessionAuthState {
    pub validator: Arc<dyn SessionValidator>,
    pub cookie: SessionCookie,
}

impl SessionAuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, cookie: SessionCookie) -> Self {
        Self { validator, cookie }
    }
}

/// Raw token of the session that authenticated the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

/// Resolves the session cookie into an `AuthenticatedUser`.
///
/// Only an unreachable session store stops the request (503); every other
/// validation failure leaves the request anonymous.
pub async fn session_middleware(
    State(state): State<SessionAuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = state.cookie.read(request.headers()) else {
        return next.run(request).await;
    };

    match state.validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(SessionToken(token));
        }
        Err(AuthError::ServiceUnavailable(msg)) => {
            tracing::error!("Session store unavailable: {}", msg);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Authentication service unavailable")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::debug!(reason = %e, "Ignoring session cookie");
        }
    }

    next.run(request).await
}

/// Extractor that requires authentication.
///
/// Rejects with 401 `{"error": "Unauthorized"}` when the middleware did not
/// resolve a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid session cookie was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized())).into_response()
            }
        }
    }
}

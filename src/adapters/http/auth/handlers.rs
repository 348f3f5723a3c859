//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::de::DeserializeOwned;

use crate::adapters::http::cookies::SessionCookie;
use crate::adapters::http::dto::{ErrorResponse, SuccessResponse};
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth, SessionToken};
use crate::application::handlers::auth::{
    InitDbError, InitDbHandler, LoginCommand, LoginHandler, LogoutCommand, LogoutHandler,
    SignupCommand, SignupHandler,
};
use crate::domain::user::AccountError;

use super::dto::{
    AuthSuccessResponse, CheckAuthResponse, LoginRequest, MessageResponse, SignupRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    signup_handler: Arc<SignupHandler>,
    login_handler: Arc<LoginHandler>,
    logout_handler: Arc<LogoutHandler>,
    init_db_handler: Arc<InitDbHandler>,
    cookie: SessionCookie,
}

impl AuthHandlers {
    pub fn new(
        signup_handler: Arc<SignupHandler>,
        login_handler: Arc<LoginHandler>,
        logout_handler: Arc<LogoutHandler>,
        init_db_handler: Arc<InitDbHandler>,
        cookie: SessionCookie,
    ) -> Self {
        Self {
            signup_handler,
            login_handler,
            logout_handler,
            init_db_handler,
            cookie,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/signup - Register and log in
pub async fn signup(State(handlers): State<AuthHandlers>, body: Bytes) -> Response {
    let req: SignupRequest = match parse_body(&body) {
        Ok(Some(req)) => req,
        Ok(None) => return handle_account_error(AccountError::MissingFields),
        Err(response) => return response,
    };

    let cmd = SignupCommand {
        email: req.email,
        username: req.username,
        password: req.password,
    };

    match handlers.signup_handler.handle(cmd).await {
        Ok(result) => with_cookie(
            (StatusCode::OK, Json(AuthSuccessResponse::new(result.user))).into_response(),
            handlers.cookie.issue(&result.session_token, None),
        ),
        Err(AccountError::Infrastructure(msg)) => {
            tracing::error!("Registration failed: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Registration failed")),
            )
                .into_response()
        }
        Err(e) => handle_account_error(e),
    }
}

/// POST /api/login - Start a remembered session
pub async fn login(State(handlers): State<AuthHandlers>, body: Bytes) -> Response {
    let req: LoginRequest = match parse_body(&body) {
        Ok(Some(req)) => req,
        Ok(None) => return handle_account_error(AccountError::MissingFields),
        Err(response) => return response,
    };

    let cmd = LoginCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.login_handler.handle(cmd).await {
        Ok(result) => with_cookie(
            (StatusCode::OK, Json(AuthSuccessResponse::new(result.user))).into_response(),
            handlers
                .cookie
                .issue(&result.session_token, Some(result.expires_in)),
        ),
        Err(e) => handle_account_error(e),
    }
}

/// POST /api/logout - End the current session
pub async fn logout(
    State(handlers): State<AuthHandlers>,
    RequireAuth(user): RequireAuth,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Response {
    let cmd = LogoutCommand {
        user_id: user.id,
        session_token: token,
    };

    match handlers.logout_handler.handle(cmd).await {
        Ok(()) => with_cookie(
            (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
            handlers.cookie.clear(),
        ),
        Err(e) => handle_account_error(e),
    }
}

/// GET /api/check-auth - Report the current session
pub async fn check_auth(OptionalAuth(user): OptionalAuth) -> Response {
    match user {
        Some(user) => (
            StatusCode::OK,
            Json(CheckAuthResponse {
                authenticated: true,
                user: Some(user.into()),
            }),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(CheckAuthResponse {
                authenticated: false,
                user: None,
            }),
        )
            .into_response(),
    }
}

/// GET /api/init_db - Create the schema (development only)
pub async fn init_db(State(handlers): State<AuthHandlers>) -> Response {
    match handlers.init_db_handler.handle().await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Database initialized".to_string(),
            }),
        )
            .into_response(),
        Err(InitDbError::NotAllowed) => {
            (StatusCode::FORBIDDEN, Json(ErrorResponse::new("Not allowed"))).into_response()
        }
        Err(InitDbError::Infrastructure(msg)) => {
            tracing::error!("Database initialization failed: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Database initialization failed")),
            )
                .into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

/// `None` for an empty body or a JSON `null`.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid JSON body")),
        )
            .into_response()
    })
}

fn with_cookie(mut response: Response, cookie: Option<HeaderValue>) -> Response {
    match cookie {
        Some(cookie) => {
            response.headers_mut().append(header::SET_COOKIE, cookie);
            response
        }
        None => {
            tracing::error!("Session cookie could not be encoded");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response()
        }
    }
}

fn handle_account_error(error: AccountError) -> Response {
    let status = match &error {
        AccountError::MissingFields
        | AccountError::EmailAlreadyRegistered
        | AccountError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountError::Infrastructure(msg) => {
            tracing::error!("Account storage error: {}", msg);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::new(error.message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_errors_map_to_statuses() {
        assert_eq!(
            handle_account_error(AccountError::MissingFields).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_account_error(AccountError::EmailAlreadyRegistered).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_account_error(AccountError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            handle_account_error(AccountError::infrastructure("down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn empty_and_null_bodies_parse_to_none() {
        for body in ["", "  ", "null"] {
            let parsed = parse_body::<LoginRequest>(&Bytes::from(body)).unwrap();
            assert!(parsed.is_none(), "{body:?}");
        }
        assert!(parse_body::<LoginRequest>(&Bytes::from("{}")).unwrap().is_some());
        assert!(parse_body::<LoginRequest>(&Bytes::from("{oops")).is_err());
    }

    #[test]
    fn unencodable_cookie_becomes_500() {
        let response = with_cookie(StatusCode::OK.into_response(), None);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

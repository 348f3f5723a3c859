//! HTTP DTOs for account endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::AuthenticatedUser;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

/// Body of `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Public view of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
        }
    }
}

/// Response to a successful signup or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSuccessResponse {
    pub success: bool,
    pub user: UserResponse,
}

impl AuthSuccessResponse {
    pub fn new(user: AuthenticatedUser) -> Self {
        Self {
            success: true,
            user: user.into(),
        }
    }
}

/// Response of `GET /api/check-auth`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Response of `GET /api/init_db`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use secrecy::ExposeSecret;

    #[test]
    fn signup_request_tolerates_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.com"));
        assert!(req.username.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn login_request_reads_password_as_secret() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email": "a@b.com", "password": "pw"}"#).unwrap();
        assert_eq!(req.password.unwrap().expose_secret(), "pw");
    }

    #[test]
    fn anonymous_check_auth_omits_user() {
        let body = serde_json::to_value(CheckAuthResponse {
            authenticated: false,
            user: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"authenticated": false}));
    }

    #[test]
    fn auth_success_shape() {
        let user = AuthenticatedUser::new(UserId::new("u1").unwrap(), "a@b.com", "a");
        let body = serde_json::to_value(AuthSuccessResponse::new(user)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "user": {"id": "u1", "email": "a@b.com", "username": "a"}
            })
        );
    }
}

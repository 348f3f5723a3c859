//! Single-page app fallback.
//!
//! Unmatched `/api` paths answer with a JSON 404. Everything else is served
//! from the static directory, falling back to `index.html` so client-side
//! routes survive a reload.

use std::path::{Path, PathBuf};

use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::adapters::http::dto::ErrorResponse;

/// Fallback service for requests no route matched.
#[derive(Debug, Clone)]
pub struct SpaFallback {
    static_dir: PathBuf,
}

impl SpaFallback {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub async fn serve(self, request: Request) -> Response {
        if is_api_path(request.uri().path()) {
            return api_not_found().await;
        }

        let index = self.static_dir.join("index.html");
        let files = ServeDir::new(&self.static_dir).fallback(ServeFile::new(index));
        match files.oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }
}

/// JSON 404 for API requests nothing handles, including a known path
/// called with a method it does not accept.
pub async fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found())).into_response()
}

/// Any path starting with `/api`, so `/api-docs` is never handed to the client app.
fn is_api_path(path: &str) -> bool {
    path.starts_with("/api")
}

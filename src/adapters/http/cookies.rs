//! Session cookie helpers.
//!
//! The cookie carries the raw session token. It is always `HttpOnly` and
//! `SameSite=Lax`; `Secure` is configurable so plain-HTTP development works.

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Duration;

/// Name and attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// Reads the session token from the request's `Cookie` headers.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == self.name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }

    /// `Set-Cookie` value for a new session.
    ///
    /// Without `max_age` the cookie lives until the browser closes.
    pub fn issue(&self, token: &str, max_age: Option<Duration>) -> Option<HeaderValue> {
        let mut cookie = format!("{}={}; {}", self.name, token, self.attributes());
        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age.num_seconds().max(0)));
        }
        HeaderValue::from_str(&cookie).ok()
    }

    /// `Set-Cookie` value that removes the cookie from the browser.
    pub fn clear(&self) -> Option<HeaderValue> {
        let cookie = format!("{}=; {}; Max-Age=0", self.name, self.attributes());
        HeaderValue::from_str(&cookie).ok()
    }

    fn attributes(&self) -> String {
        let mut attrs = String::from("Path=/; HttpOnly; SameSite=Lax");
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }
}

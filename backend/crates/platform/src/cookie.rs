//! Session Cookie Utilities
//!
//! Builds `Set-Cookie` values for issuing and clearing the session cookie,
//! and extracts a named cookie from request headers. Session cookies are
//! always `HttpOnly`; `Secure` and `SameSite` come from settings.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every Set-Cookie this service emits
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: "session_token".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieSettings {
    /// Set-Cookie value issuing a session token valid for `max_age_secs`
    pub fn issue(&self, value: &str, max_age_secs: i64) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, value);

        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", max_age_secs));

        cookie
    }

    /// Set-Cookie value instructing the client to drop the session cookie.
    /// Carries the same attribute set as `issue` so it overwrites cleanly.
    pub fn clear(&self) -> String {
        let mut cookie = format!("{}=; HttpOnly", self.name);

        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str("; Max-Age=0");

        cookie
    }

    /// `issue` as a ready-to-use header value.
    ///
    /// Infallible for this service's inputs: the token is lowercase hex and
    /// the name/path attributes are fixed ASCII.
    pub fn issue_header(&self, value: &str, max_age_secs: i64) -> HeaderValue {
        HeaderValue::from_str(&self.issue(value, max_age_secs))
            .expect("cookie name, token, and attributes are valid header characters")
    }

    /// `clear` as a ready-to-use header value
    pub fn clear_header(&self) -> HeaderValue {
        HeaderValue::from_str(&self.clear())
            .expect("cookie name and attributes are valid header characters")
    }
}

/// Extract a cookie value by name from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

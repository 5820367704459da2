//! Cookie helpers
//!
//! Minimal building/parsing for the tenant cookie. The tenant cookie is
//! deliberately not HttpOnly so the browser-side UI can read it.

use axum::http::{header, HeaderMap};

/// SameSite policy for a response cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes applied when building a Set-Cookie value.
#[derive(Debug, Clone)]
pub struct CookieOptions {
    pub path: &'static str,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/",
            http_only: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Build a Set-Cookie header value.
pub fn build_set_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut cookie = format!(
        "{name}={value}; Path={path}; SameSite={same_site}",
        path = options.path,
        same_site = options.same_site.as_str()
    );
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }
    cookie
}

/// Read a cookie value from the request headers.
///
/// Handles multiple Cookie headers and "; "-separated pairs; malformed pairs
/// are skipped.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key.trim() == name {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
        .next()
}

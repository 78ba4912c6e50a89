//! Cookie-backed session store.
//!
//! Reads come from the request's `Cookie` headers; writes are collected as
//! `Set-Cookie` values and attached to the response. Expiry is enforced by
//! the browser through `Max-Age`.

use std::collections::HashMap;
use std::time::Duration;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

use super::SessionStore;

/// Session state carried in the caller's cookies.
#[derive(Debug, Default)]
pub struct CookieSession {
    cookies: HashMap<String, String>,
    pending: Vec<HeaderValue>,
}

impl CookieSession {
    /// Parses every `Cookie` header of an incoming request.
    ///
    /// When a name appears more than once the first occurrence wins, which is
    /// the most specific path match as sent by browsers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = HashMap::new();
        for header in headers.get_all(COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };
            for pair in header.split(';') {
                let Some((name, value)) = pair.trim().split_once('=') else {
                    continue;
                };
                let value = value.trim().trim_matches('"');
                cookies
                    .entry(name.trim().to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
        Self {
            cookies,
            pending: Vec::new(),
        }
    }

    /// `Set-Cookie` values produced by `set` so far.
    pub fn set_cookie_headers(&self) -> &[HeaderValue] {
        &self.pending
    }

    /// Appends the pending `Set-Cookie` values to a response's headers.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        for value in &self.pending {
            headers.append(SET_COOKIE, value.clone());
        }
    }
}

impl SessionStore for CookieSession {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        let cookie = format!(
            "{}={}; Max-Age={}; Path=/; SameSite=Lax; Secure",
            key,
            value,
            ttl.as_secs()
        );
        match HeaderValue::from_str(&cookie) {
            Ok(header) => {
                self.pending.push(header);
                self.cookies.insert(key.to_string(), value.to_string());
            }
            Err(e) => log::warn!("Dropping cookie {}: value not header-safe ({})", key, e),
        }
    }
}

//! Per-caller session state.
//!
//! The relay remembers exactly one thing per caller: the last URL it rendered
//! successfully. The asset relay reads it back to know which origin a
//! sub-resource request belongs to.
//!
//! Storage is behind `SessionStore`, a key-value interface with TTL. In
//! production the store is the caller's cookie jar (`CookieSession`); tests
//! use `MemorySession`.

mod cookie;
mod memory;

use std::time::Duration;

use crate::config::{LAST_QUERY_COOKIE, SESSION_TTL};

pub use cookie::CookieSession;
pub use memory::MemorySession;

/// Opaque key-value store with per-entry lifetime.
pub trait SessionStore {
    /// Returns the value stored under `key`, or `None` if unset or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl`.
    fn set(&mut self, key: &str, value: &str, ttl: Duration);
}

/// Records `url` as the caller's last analyzed URL (percent-encoded, one week).
pub fn record_analyzed_url<S: SessionStore + ?Sized>(store: &mut S, url: &str) {
    store.set(LAST_QUERY_COOKIE, &urlencoding::encode(url), SESSION_TTL);
}

/// Reads back the caller's last analyzed URL, percent-decoded.
pub fn last_analyzed_url<S: SessionStore + ?Sized>(store: &S) -> Option<String> {
    let raw = store.get(LAST_QUERY_COOKIE)?;
    let decoded = match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::warn!("Ignoring undecodable {} value: {}", LAST_QUERY_COOKIE, e);
            return None;
        }
    };
    if decoded.is_empty() {
        return None;
    }
    Some(decoded)
}

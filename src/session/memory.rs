//! In-process session store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::SessionStore;

/// `SessionStore` backed by a map, with expiry checked on read.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    entries: HashMap<String, (String, Instant)>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        let (value, expires_at) = self.entries.get(key)?;
        if Instant::now() >= *expires_at {
            return None;
        }
        Some(value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }
}

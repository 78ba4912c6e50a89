//! Relay statistics tracking.
//!
//! Thread-safe counters for every `RelayEvent`, shared across handlers and
//! read by the status server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use strum::IntoEnumIterator;

use super::types::{RelayError, RelayEvent};

/// Thread-safe relay statistics tracker.
///
/// All event types are initialized to zero on creation, so the map is never
/// mutated after construction and needs no lock.
pub struct RelayStats {
    counts: HashMap<RelayEvent, AtomicUsize>,
    started: Instant,
}

impl RelayStats {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for event in RelayEvent::iter() {
            counts.insert(event, AtomicUsize::new(0));
        }

        RelayStats {
            counts,
            started: Instant::now(),
        }
    }

    /// Increment an event counter.
    pub fn increment(&self, event: RelayEvent) {
        if let Some(counter) = self.counts.get(&event) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in RelayStats initialization.",
                event
            );
        }
    }

    /// Increment the counter matching a returned error.
    pub fn record_error(&self, error: &RelayError) {
        self.increment(error.event());
    }

    pub fn get_count(&self, event: RelayEvent) -> usize {
        self.counts
            .get(&event)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        RelayEvent::iter()
            .filter(|e| e.is_error())
            .map(|e| self.get_count(e))
            .sum()
    }

    pub fn total_requests(&self) -> usize {
        RelayEvent::iter().map(|e| self.get_count(e)).sum()
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl Default for RelayStats {
    fn default() -> Self {
        Self::new()
    }
}

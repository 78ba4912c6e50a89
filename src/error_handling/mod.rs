//! Error handling and relay statistics.
//!
//! This module provides:
//! - The request-level error taxonomy (`RelayError`) and its HTTP mapping
//! - Initialization errors for logger, HTTP clients and resolver setup
//! - Event counters (`RelayStats`) exposed by the status server
//!
//! Validation and resolution failures are reported to the caller with a
//! specific status and a short message. Backend failures are logged in full
//! and reduced to a generic message on the wire.

mod stats;
mod types;

// Re-export public API
pub use stats::RelayStats;
pub use types::{InitializationError, RelayError, RelayEvent};

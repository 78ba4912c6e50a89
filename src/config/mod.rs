//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (cookie name, TTL, backend paths)
//! - CLI option types and parsing
//! - The library-side `Config` struct handed to every component

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{parse_dns_server, Config, LogFormat, LogLevel, Opt};

//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP clients (render backend and asset relay)
//! - Restricted DNS resolver backing the SSRF guard
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::{init_asset_client, init_render_client};
pub use logger::init_logger_with;
pub use resolver::{init_dns_guard, init_restricted_resolver};

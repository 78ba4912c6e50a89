//! Status server data structures.

use serde::Serialize;
use std::sync::Arc;

use crate::error_handling::RelayStats;

/// Shared state for the status server
#[derive(Clone)]
pub struct StatusState {
    pub stats: Arc<RelayStats>,
    /// Whether hosts are vetted by a restricted resolver
    pub ssrf_guard_enabled: bool,
}

/// JSON response for `/status` endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub ssrf_guard_enabled: bool,
    pub total_requests: usize,
    pub total_errors: usize,
    pub analysis: AnalysisCounts,
    pub catch_all: CatchAllCounts,
}

#[derive(Serialize)]
pub struct AnalysisCounts {
    pub empty_query: usize,
    pub page_rendered: usize,
    pub invalid_url: usize,
    pub dns_resolution_failed: usize,
    pub render_backend_unreachable: usize,
    pub render_backend_error: usize,
}

#[derive(Serialize)]
pub struct CatchAllCounts {
    pub navigation_redirect: usize,
    pub asset_relayed: usize,
    pub session_missing: usize,
    pub path_too_short: usize,
    pub upstream_unreachable: usize,
    pub upstream_timeout: usize,
}

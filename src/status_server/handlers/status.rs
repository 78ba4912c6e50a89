//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{AnalysisCounts, CatchAllCounts, StatusResponse, StatusState};
use crate::error_handling::RelayEvent;

/// JSON status endpoint with per-event request counts
pub async fn status_handler(State(state): State<StatusState>) -> Response {
    let stats = &state.stats;

    let response = StatusResponse {
        uptime_seconds: stats.uptime_seconds(),
        ssrf_guard_enabled: state.ssrf_guard_enabled,
        total_requests: stats.total_requests(),
        total_errors: stats.total_errors(),
        analysis: AnalysisCounts {
            empty_query: stats.get_count(RelayEvent::EmptyQuery),
            page_rendered: stats.get_count(RelayEvent::PageRendered),
            invalid_url: stats.get_count(RelayEvent::InvalidUrl),
            dns_resolution_failed: stats.get_count(RelayEvent::DnsResolutionFailed),
            render_backend_unreachable: stats.get_count(RelayEvent::RenderBackendUnreachable),
            render_backend_error: stats.get_count(RelayEvent::RenderBackendError),
        },
        catch_all: CatchAllCounts {
            navigation_redirect: stats.get_count(RelayEvent::NavigationRedirect),
            asset_relayed: stats.get_count(RelayEvent::AssetRelayed),
            session_missing: stats.get_count(RelayEvent::SessionMissing),
            path_too_short: stats.get_count(RelayEvent::PathTooShort),
            upstream_unreachable: stats.get_count(RelayEvent::UpstreamUnreachable),
            upstream_timeout: stats.get_count(RelayEvent::UpstreamTimeout),
        },
    };

    let json = match serde_json::to_string_pretty(&response) {
        Ok(json) => json,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize status: {}", e),
            )
                .into_response();
        }
    };

    (StatusCode::OK, [("content-type", "application/json")], json).into_response()
}

//! Prometheus metrics handler.

use std::fmt::Write;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum::IntoEnumIterator;

use super::super::types::StatusState;
use crate::error_handling::RelayEvent;

/// Renders the Prometheus exposition text for the current counters.
pub fn render_metrics(state: &StatusState) -> String {
    let stats = &state.stats;
    let mut metrics = format!(
        r#"# HELP render_proxy_uptime_seconds Seconds since the relay started
# TYPE render_proxy_uptime_seconds gauge
render_proxy_uptime_seconds {}

# HELP render_proxy_ssrf_guard_enabled Whether hosts are vetted by a restricted resolver
# TYPE render_proxy_ssrf_guard_enabled gauge
render_proxy_ssrf_guard_enabled {}

# HELP render_proxy_errors_total Requests that ended with an error status
# TYPE render_proxy_errors_total counter
render_proxy_errors_total {}

# HELP render_proxy_events_total Requests by outcome
# TYPE render_proxy_events_total counter
"#,
        stats.uptime_seconds(),
        u8::from(state.ssrf_guard_enabled),
        stats.total_errors(),
    );

    for event in RelayEvent::iter() {
        // Writing to a String cannot fail
        let _ = writeln!(
            metrics,
            "render_proxy_events_total{{event=\"{}\"}} {}",
            event.metric_label(),
            stats.get_count(event)
        );
    }
    metrics
}

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<StatusState>) -> Response {
    (StatusCode::OK, render_metrics(&state)).into_response()
}

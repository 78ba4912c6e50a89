//! Error type definitions.
//!
//! This module defines the relay's error taxonomy and the events counted by
//! `RelayStats`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The render backend host is not a usable base URL.
    #[error("Render backend configuration error: {0}")]
    RenderBackendConfigError(String),

    /// Error building the restricted DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Failures of the analysis pipeline and the asset relay.
///
/// `Display` carries the full detail for server-side logs; `client_message`
/// is what the caller sees.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The query did not parse as an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host did not resolve through the restricted DNS server.
    #[error("DNS resolution failed for {host}: {reason}")]
    DnsResolutionFailed { host: String, reason: String },

    /// The render request never got a response.
    #[error("Render backend unreachable: {0}")]
    RenderBackendUnreachable(String),

    /// The render backend answered with a non-success status.
    #[error("Render backend returned {status}: {body}")]
    RenderBackendError { status: u16, body: String },

    /// No analyzed URL is recorded for this caller.
    #[error("No query found")]
    SessionMissing,

    /// The catch-all path is shorter than the minimum query length.
    #[error("Query too short")]
    PathTooShort,

    /// The asset fetch failed at the transport level.
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The asset fetch timed out.
    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),
}

impl RelayError {
    /// HTTP status returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidUrl(_)
            | RelayError::DnsResolutionFailed { .. }
            | RelayError::PathTooShort => StatusCode::BAD_REQUEST,
            RelayError::RenderBackendUnreachable(_) | RelayError::RenderBackendError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::SessionMissing => StatusCode::NOT_FOUND,
            RelayError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            RelayError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Body text returned to the caller. Backend and upstream details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            RelayError::InvalidUrl(reason) if reason.trim().is_empty() => "Invalid URL".into(),
            RelayError::InvalidUrl(reason) => reason.clone(),
            RelayError::DnsResolutionFailed { host, .. } => format!(
                "Could not resolve {host}. This might be intentional: the host is not \
                 reachable through the resolver this service is restricted to."
            ),
            RelayError::RenderBackendUnreachable(_) | RelayError::RenderBackendError { .. } => {
                "Internal server error".into()
            }
            RelayError::SessionMissing => "No query found".into(),
            RelayError::PathTooShort => "Query too short".into(),
            RelayError::UpstreamUnreachable(_) => "Bad gateway".into(),
            RelayError::UpstreamTimeout(_) => "Gateway timeout".into(),
        }
    }

    /// Event counted when this error is returned.
    pub fn event(&self) -> RelayEvent {
        match self {
            RelayError::InvalidUrl(_) => RelayEvent::InvalidUrl,
            RelayError::DnsResolutionFailed { .. } => RelayEvent::DnsResolutionFailed,
            RelayError::RenderBackendUnreachable(_) => RelayEvent::RenderBackendUnreachable,
            RelayError::RenderBackendError { .. } => RelayEvent::RenderBackendError,
            RelayError::SessionMissing => RelayEvent::SessionMissing,
            RelayError::PathTooShort => RelayEvent::PathTooShort,
            RelayError::UpstreamUnreachable(_) => RelayEvent::UpstreamUnreachable,
            RelayError::UpstreamTimeout(_) => RelayEvent::UpstreamTimeout,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.client_message()).into_response()
    }
}

/// Events counted per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RelayEvent {
    // Analysis entry point
    EmptyQuery,
    PageRendered,
    InvalidUrl,
    DnsResolutionFailed,
    RenderBackendUnreachable,
    RenderBackendError,
    // Catch-all route
    NavigationRedirect,
    AssetRelayed,
    SessionMissing,
    PathTooShort,
    UpstreamUnreachable,
    UpstreamTimeout,
}

impl std::fmt::Display for RelayEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RelayEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayEvent::EmptyQuery => "Empty query",
            RelayEvent::PageRendered => "Page rendered",
            RelayEvent::InvalidUrl => "Invalid URL",
            RelayEvent::DnsResolutionFailed => "DNS resolution failed",
            RelayEvent::RenderBackendUnreachable => "Render backend unreachable",
            RelayEvent::RenderBackendError => "Render backend error",
            RelayEvent::NavigationRedirect => "Navigation redirect",
            RelayEvent::AssetRelayed => "Asset relayed",
            RelayEvent::SessionMissing => "Session missing",
            RelayEvent::PathTooShort => "Path too short",
            RelayEvent::UpstreamUnreachable => "Upstream unreachable",
            RelayEvent::UpstreamTimeout => "Upstream timeout",
        }
    }

    /// Snake-case label used in the Prometheus output.
    pub fn metric_label(&self) -> &'static str {
        match self {
            RelayEvent::EmptyQuery => "empty_query",
            RelayEvent::PageRendered => "page_rendered",
            RelayEvent::InvalidUrl => "invalid_url",
            RelayEvent::DnsResolutionFailed => "dns_resolution_failed",
            RelayEvent::RenderBackendUnreachable => "render_backend_unreachable",
            RelayEvent::RenderBackendError => "render_backend_error",
            RelayEvent::NavigationRedirect => "navigation_redirect",
            RelayEvent::AssetRelayed => "asset_relayed",
            RelayEvent::SessionMissing => "session_missing",
            RelayEvent::PathTooShort => "path_too_short",
            RelayEvent::UpstreamUnreachable => "upstream_unreachable",
            RelayEvent::UpstreamTimeout => "upstream_timeout",
        }
    }

    /// Whether the event ends the request with an error status.
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            RelayEvent::EmptyQuery
                | RelayEvent::PageRendered
                | RelayEvent::NavigationRedirect
                | RelayEvent::AssetRelayed
        )
    }
}

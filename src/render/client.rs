//! Render backend client.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use log::{error, info};
use url::Url;

use super::types::{GotoOptions, RenderRequest, RenderedContent};
use crate::config::{DEFAULT_HTML_CONTENT_TYPE, RENDER_CONTENT_PATH, RENDER_WAIT_UNTIL};
use crate::error_handling::{InitializationError, RelayError};
use crate::security::ValidatedUrl;

/// Client for `POST {host}/content?token={token}`.
#[derive(Clone)]
pub struct RenderClient {
    client: Arc<reqwest::Client>,
    endpoint: Url,
}

impl RenderClient {
    /// Builds the client for the backend at `host`, authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RenderBackendConfigError` if `host` is not
    /// an absolute http(s) URL.
    pub fn new(
        client: Arc<reqwest::Client>,
        host: &str,
        token: &str,
    ) -> Result<Self, InitializationError> {
        let base = format!("{}{}", host.trim_end_matches('/'), RENDER_CONTENT_PATH);
        let mut endpoint = Url::parse(&base).map_err(|e| {
            InitializationError::RenderBackendConfigError(format!("'{}': {}", host, e))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(InitializationError::RenderBackendConfigError(format!(
                "'{}' is not an http(s) URL",
                host
            )));
        }
        endpoint.query_pairs_mut().append_pair("token", token);

        Ok(Self { client, endpoint })
    }

    /// Endpoint every render request is posted to (token included).
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Renders `target` and returns the backend's response for streaming.
    ///
    /// # Errors
    ///
    /// - `RelayError::RenderBackendUnreachable` when the request fails in transport
    /// - `RelayError::RenderBackendError` when the backend answers non-2xx; the
    ///   backend's body is logged here and only kept in the error for logs
    pub async fn render(&self, target: &ValidatedUrl) -> Result<RenderedContent, RelayError> {
        let request = RenderRequest {
            url: target.as_str(),
            goto_options: GotoOptions {
                wait_until: RENDER_WAIT_UNTIL,
            },
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-cache")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Render backend request for {} failed: {}", target.as_str(), e);
                RelayError::RenderBackendUnreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            error!(
                "Render backend returned {} for {}: {}",
                status,
                target.as_str(),
                body
            );
            return Err(RelayError::RenderBackendError {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_HTML_CONTENT_TYPE));

        info!("Rendered {} ({})", target.as_str(), status);

        Ok(RenderedContent {
            status,
            content_type,
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}

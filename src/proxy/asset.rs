//! Asset fetch and relay.

use std::sync::Arc;

use axum::body::Body;
use axum::response::Response;
use log::{debug, warn};
use url::Url;

use super::headers::relayed_headers;
use crate::error_handling::RelayError;
use crate::security::{validate_url, DnsGuard};

/// Rewrites `path` onto the origin of `last_analyzed`.
///
/// Scheme, host and port are kept; the analyzed URL's own path, query and
/// fragment are dropped.
///
/// # Errors
///
/// Returns `RelayError::SessionMissing` when the recorded URL is not a usable
/// http(s) URL (the session value is client-held and may be tampered with).
pub fn asset_target(last_analyzed: &str, path: &str) -> Result<Url, RelayError> {
    let mut target = validate_url(last_analyzed)
        .map_err(|e| {
            warn!("Ignoring unusable session URL {:?}: {}", last_analyzed, e);
            RelayError::SessionMissing
        })?
        .url()
        .clone();
    target.set_path(path);
    target.set_query(None);
    target.set_fragment(None);
    Ok(target)
}

/// Fetches assets from the analyzed origin and relays them to the caller.
#[derive(Clone)]
pub struct AssetProxy {
    client: Arc<reqwest::Client>,
    guard: DnsGuard,
}

impl AssetProxy {
    pub fn new(client: Arc<reqwest::Client>, guard: DnsGuard) -> Self {
        Self { client, guard }
    }

    /// GETs `target` and relays status, headers and body.
    ///
    /// Upstream error statuses are relayed like any other response.
    ///
    /// # Errors
    ///
    /// - `RelayError::DnsResolutionFailed` when the guard rejects the origin
    /// - `RelayError::UpstreamTimeout` when the fetch times out
    /// - `RelayError::UpstreamUnreachable` for any other transport failure
    pub async fn relay(&self, target: Url) -> Result<Response, RelayError> {
        self.guard.check(&target).await?;

        let upstream = self.client.get(target.clone()).send().await.map_err(|e| {
            warn!("Asset fetch for {} failed: {}", target, e);
            if e.is_timeout() {
                RelayError::UpstreamTimeout(e.to_string())
            } else {
                RelayError::UpstreamUnreachable(e.to_string())
            }
        })?;

        let status = upstream.status();
        debug!("Relaying {} ({})", target, status);

        let mut response = Response::new(Body::empty());
        *response.status_mut() = status;
        *response.headers_mut() = relayed_headers(upstream.headers());
        *response.body_mut() = Body::from_stream(upstream.bytes_stream());
        Ok(response)
    }
}

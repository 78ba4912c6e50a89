//! HTTP client initialization.
//!
//! Neither client sets a request timeout: a slow backend or origin stalls only
//! the caller waiting on it, and the transport defaults apply.

use std::sync::Arc;

use reqwest::ClientBuilder;

/// User-Agent sent on calls to the render backend.
const RENDER_USER_AGENT: &str = concat!("render_proxy/", env!("CARGO_PKG_VERSION"));

/// Initializes the client used for render backend calls.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_render_client() -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .user_agent(RENDER_USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the client used to relay assets from the analyzed origin.
///
/// Redirects are disabled so the upstream's 3xx responses reach the browser
/// unchanged, and bodies are passed through without decompression.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_asset_client() -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(Arc::new(client))
}

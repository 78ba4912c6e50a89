//! Shared handler state.

use std::sync::Arc;

use crate::config::Config;
use crate::error_handling::{InitializationError, RelayStats};
use crate::initialization::{init_asset_client, init_dns_guard, init_render_client};
use crate::proxy::AssetProxy;
use crate::render::RenderClient;
use crate::security::DnsGuard;

/// Everything a request handler needs. Cloned per request; all members are
/// cheap handles and none is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub guard: DnsGuard,
    pub render: RenderClient,
    pub assets: AssetProxy,
    pub stats: Arc<RelayStats>,
}

impl AppState {
    /// Assembles state from already-built components.
    pub fn new(guard: DnsGuard, render: RenderClient, assets: AssetProxy) -> Self {
        Self {
            guard,
            render,
            assets,
            stats: Arc::new(RelayStats::new()),
        }
    }

    /// Builds clients, resolver and guard from configuration.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if an HTTP client cannot be built or the
    /// render backend host is unusable.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let guard = init_dns_guard(config.restricted_dns_server)?;
        let render = RenderClient::new(
            init_render_client()?,
            &config.render_backend_host,
            &config.render_backend_token,
        )?;
        let assets = AssetProxy::new(init_asset_client()?, guard.clone());
        Ok(Self::new(guard, render, assets))
    }
}

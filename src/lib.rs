//! render_proxy library: renders external pages and relays their sub-resources
//!
//! A caller asks for `/?query=<url>`. The URL is validated, its host is
//! optionally vetted against a restricted DNS server, and the page is rendered
//! by a headless-browser backend. The analyzed URL is remembered in a cookie so
//! that relative asset requests the rendered page makes (`/img/logo.png`) can be
//! fetched from the analyzed origin and relayed, and in-page navigations can be
//! bounced back to the analysis entry point.
//!
//! # Example
//!
//! ```no_run
//! use render_proxy::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), anyhow::Error> {
//! let config = Config {
//!     render_backend_host: "https://chrome.example.com".to_string(),
//!     render_backend_token: "secret".to_string(),
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod analysis;
pub mod config;
pub mod dispatch;
pub mod error_handling;
pub mod initialization;
pub mod proxy;
pub mod render;
pub mod security;
pub mod server;
pub mod session;
pub mod status_server;

// Re-export public API
pub use analysis::{analyze, Analysis};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{InitializationError, RelayError};
pub use server::{build_router, AppState};

use anyhow::Context;

/// Builds every component from `config` and serves until shutdown.
///
/// When `config.status_port` is set, the status server is spawned alongside
/// on the loopback interface; a failure there is logged and does not stop the
/// relay.
///
/// # Errors
///
/// Returns an error if initialization fails or the listen address cannot be bound.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).context("Failed to initialize relay")?;

    if let Some(port) = config.status_port {
        let status_state = status_server::StatusState {
            stats: state.stats.clone(),
            ssrf_guard_enabled: state.guard.is_enabled(),
        };
        tokio::spawn(async move {
            if let Err(e) = status_server::start_status_server(port, status_state).await {
                log::warn!("Status server error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    server::serve(listener, state).await
}

//! Relay HTTP server.
//!
//! Routes:
//! - `GET /` - analysis entry point (`?query=<url>`)
//! - `GET /*path` - catch-all: navigation redirect or asset relay
//!
//! Requests are independent. The only per-caller state is the session cookie,
//! held by the client.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

pub use handlers::{analyze_handler, catch_all_handler, first_query_value, EMPTY_STATE_PAGE};
pub use state::AppState;

/// Builds the relay router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(analyze_handler))
        .route("/*path", get(catch_all_handler))
        .with_state(state)
}

/// Serves the relay on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    let addr = listener
        .local_addr()
        .map_err(|e| anyhow::anyhow!("Failed to read listener address: {}", e))?;
    log::info!("Render proxy listening on http://{}/", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Relay server error: {}", e))?;

    log::info!("Render proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutdown signal received");
}

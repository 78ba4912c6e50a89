//! Catch-all handler (`GET /*path`).

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use log::info;

use crate::dispatch::{dispatch_path, Dispatch};
use crate::error_handling::{RelayError, RelayEvent};
use crate::proxy::asset_target;
use crate::server::state::AppState;
use crate::session::CookieSession;

pub async fn catch_all_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session = CookieSession::from_headers(&headers);

    match handle(&state, &path, &session).await {
        Ok(response) => response,
        Err(e) => {
            state.stats.record_error(&e);
            e.into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    path: &str,
    session: &CookieSession,
) -> Result<Response, RelayError> {
    match dispatch_path(path, session)? {
        Dispatch::Redirect(location) => {
            info!("Treating /{} as navigation, redirecting to {}", path, location);
            state.stats.increment(RelayEvent::NavigationRedirect);
            Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
        }
        Dispatch::ProxyAsset {
            last_analyzed,
            path,
        } => {
            let target = asset_target(&last_analyzed, &path)?;
            let response = state.assets.relay(target).await?;
            state.stats.increment(RelayEvent::AssetRelayed);
            Ok(response)
        }
    }
}

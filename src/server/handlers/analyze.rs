//! Analysis entry point handler (`GET /?query=...`).

use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

use crate::analysis::{analyze, Analysis};
use crate::config::QUERY_PARAM;
use crate::error_handling::RelayEvent;
use crate::server::state::AppState;
use crate::session::CookieSession;

/// Landing page served when no query is present.
pub const EMPTY_STATE_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Render proxy</title></head>
<body>
<form method="get" action="/">
<input type="url" name="query" placeholder="https://example.com" required>
<button type="submit">Analyze</button>
</form>
</body>
</html>
"#;

/// Form-decoded value of the first `query` pair in a raw query string.
///
/// Later duplicates are ignored; malformed pairs never fail the request.
pub fn first_query_value(raw_query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(raw_query?.as_bytes())
        .find(|(name, _)| name == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let mut session = CookieSession::from_headers(&headers);
    let query = first_query_value(raw_query.as_deref());

    match analyze(
        query.as_deref(),
        &state.guard,
        &state.render,
        &mut session,
    )
    .await
    {
        Ok(Analysis::Empty) => {
            state.stats.increment(RelayEvent::EmptyQuery);
            Html(EMPTY_STATE_PAGE).into_response()
        }
        Ok(Analysis::Rendered(content)) => {
            state.stats.increment(RelayEvent::PageRendered);
            let mut response = content.into_response();
            session.write_to(response.headers_mut());
            response
        }
        Err(e) => {
            state.stats.record_error(&e);
            e.into_response()
        }
    }
}

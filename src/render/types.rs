//! Render backend wire types.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of `POST {host}/content`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest<'a> {
    pub url: &'a str,
    pub goto_options: GotoOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GotoOptions<'a> {
    pub wait_until: &'a str,
}

/// A successful render, streamed to the caller.
#[derive(Debug)]
pub struct RenderedContent {
    /// 2xx status the backend answered with. Logged only; callers always get 200.
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Body,
}

impl IntoResponse for RenderedContent {
    fn into_response(self) -> Response {
        (StatusCode::OK, [(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

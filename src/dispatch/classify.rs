//! Extension-based path classification.
//!
//! This is a heuristic. A path without an extension, or ending in `.html`, is
//! taken to be page navigation; anything else is a sub-resource. Extensionless
//! assets and page-like `.json` endpoints are misclassified.

use crate::config::QUERY_PARAM;

/// How a catch-all path is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Re-run analysis with the path as the query.
    Redirect,
    /// Relay the path from the last analyzed origin.
    ProxyAsset,
}

/// Returns the text after the last `.` of the final path segment.
///
/// `None` when the final segment has no dot or ends with one.
pub fn file_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = segment.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension)
}

pub fn classify_path(path: &str) -> PathClass {
    match file_extension(path) {
        None | Some("html") => PathClass::Redirect,
        Some(_) => PathClass::ProxyAsset,
    }
}

/// Location of the analysis entry point for `path`.
pub fn analysis_redirect_location(path: &str) -> String {
    format!("/?{}={}", QUERY_PARAM, urlencoding::encode(path))
}

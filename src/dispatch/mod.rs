//! Catch-all dispatch.
//!
//! Any path the analysis entry point does not own lands here. Paths that look
//! like page navigation are sent back through analysis; everything else is
//! treated as a sub-resource of the last analyzed page and relayed.

mod classify;

pub use classify::{analysis_redirect_location, classify_path, file_extension, PathClass};

use crate::config::MIN_QUERY_LEN;
use crate::error_handling::RelayError;
use crate::session::{last_analyzed_url, SessionStore};

/// What to do with a catch-all request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// 302 to this location on the analysis entry point.
    Redirect(String),
    /// Relay `path` from the origin of `last_analyzed`.
    ProxyAsset { last_analyzed: String, path: String },
}

/// Decides how to answer an unmatched `path` (without its leading `/`).
///
/// # Errors
///
/// - `RelayError::SessionMissing` when no URL has been analyzed yet, whatever the path
/// - `RelayError::PathTooShort` when `path` is under `MIN_QUERY_LEN` characters
pub fn dispatch_path<S: SessionStore + ?Sized>(
    path: &str,
    session: &S,
) -> Result<Dispatch, RelayError> {
    let last_analyzed = last_analyzed_url(session).ok_or(RelayError::SessionMissing)?;

    if path.chars().count() < MIN_QUERY_LEN {
        return Err(RelayError::PathTooShort);
    }

    match classify_path(path) {
        PathClass::Redirect => Ok(Dispatch::Redirect(analysis_redirect_location(path))),
        PathClass::ProxyAsset => Ok(Dispatch::ProxyAsset {
            last_analyzed,
            path: path.to_string(),
        }),
    }
}

//! Asset relay.
//!
//! Sub-resource requests from a rendered page are rewritten onto the origin of
//! the last analyzed URL and fetched directly, bypassing the render backend.
//! The upstream status, headers and body are passed through with permissive
//! CORS headers on top.

mod asset;
mod headers;

pub use asset::{asset_target, AssetProxy};
pub use headers::relayed_headers;

//! Input validation and SSRF protection.
//!
//! Two gates stand between a caller-supplied query and any outbound request:
//! - `url_validation`: the query must decode to an absolute http(s) URL with a host
//! - `dns_guard`: the host must resolve through the operator's restricted DNS
//!   server (when one is configured)
//!
//! Scoping resolution to a filtering resolver lets operators decide which
//! network view rendering may reach without maintaining IP denylists here.

mod dns_guard;
mod url_validation;

pub use dns_guard::{DnsGuard, HostResolver, Resolution};
pub use url_validation::{decode_query, parse_analysis_query, validate_url, ValidatedUrl};

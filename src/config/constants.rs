//! Configuration constants.
//!
//! Wire-level names and limits shared by the analysis pipeline, the session
//! store and the asset relay.

use std::time::Duration;

/// Name of the query parameter carrying the URL to analyze.
pub const QUERY_PARAM: &str = "query";

/// Minimum decoded length for a query (and a catch-all path) to be considered present.
pub const MIN_QUERY_LEN: usize = 3;

/// Cookie holding the last successfully analyzed URL.
pub const LAST_QUERY_COOKIE: &str = "lastQuery";

/// Lifetime of the last-analyzed-URL session record (1 week).
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Path of the render backend endpoint that returns page HTML.
pub const RENDER_CONTENT_PATH: &str = "/content";

/// Puppeteer navigation hint sent with every render request.
pub const RENDER_WAIT_UNTIL: &str = "networkidle2";

/// Default listen address for the relay.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Port used for the restricted DNS server when none is given.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Content type sent when the render backend does not provide one.
pub const DEFAULT_HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

// CORS headers overlaid on every relayed asset
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "content-type";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

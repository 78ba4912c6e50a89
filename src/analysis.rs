//! The analysis pipeline: validate → resolve → render → record.
//!
//! Strictly sequential within a request. Each stage short-circuits the rest,
//! so an invalid query never reaches DNS and a rejected host never reaches
//! the render backend. The session is written only after a successful
//! render, before the response is returned.

use log::info;

use crate::error_handling::RelayError;
use crate::render::{RenderClient, RenderedContent};
use crate::security::{parse_analysis_query, DnsGuard, Resolution};
use crate::session::{record_analyzed_url, SessionStore};

/// Result of a call to the analysis entry point.
pub enum Analysis {
    /// No usable query; the caller gets the empty-state page.
    Empty,
    /// The backend rendered the page.
    Rendered(RenderedContent),
}

/// Runs the analysis pipeline for a raw `query` parameter.
///
/// # Errors
///
/// - `RelayError::InvalidUrl` if the query is not an absolute http(s) URL
/// - `RelayError::DnsResolutionFailed` if the guard rejects the host
/// - `RelayError::RenderBackendUnreachable` / `RelayError::RenderBackendError`
///   if rendering fails
pub async fn analyze<S: SessionStore + ?Sized>(
    raw_query: Option<&str>,
    guard: &DnsGuard,
    render: &RenderClient,
    session: &mut S,
) -> Result<Analysis, RelayError> {
    let Some(target) = parse_analysis_query(raw_query).map_err(|e| {
        log::warn!("Rejected query {:?}: {}", raw_query.unwrap_or_default(), e);
        e
    })?
    else {
        return Ok(Analysis::Empty);
    };

    if let Resolution::Resolved(addrs) = guard.check(target.url()).await? {
        info!("{} cleared by restricted resolver ({:?})", target.host(), addrs);
    }

    let content = render.render(&target).await?;
    record_analyzed_url(session, target.as_str());

    Ok(Analysis::Rendered(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LAST_QUERY_COOKIE;
    use crate::security::HostResolver;
    use crate::session::{last_analyzed_url, MemorySession};
    use futures::future::BoxFuture;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Resolver that fails every lookup and counts calls.
    #[derive(Default)]
    struct RefusingResolver {
        calls: AtomicUsize,
    }

    impl HostResolver for RefusingResolver {
        fn lookup_ipv4<'a>(
            &'a self,
            host: &'a str,
        ) -> BoxFuture<'a, Result<Vec<Ipv4Addr>, String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Err(format!("REFUSED for {host}")) })
        }
    }

    async fn backend(expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    fn render_client(server: &MockServer) -> RenderClient {
        RenderClient::new(Arc::new(reqwest::Client::new()), &server.uri(), "t").unwrap()
    }

    #[tokio::test]
    async fn test_short_query_makes_no_outbound_calls() {
        let server = backend(0).await;
        let resolver = Arc::new(RefusingResolver::default());
        let guard = DnsGuard::new(resolver.clone());
        let mut session = MemorySession::new();

        for raw in [None, Some(""), Some("ab")] {
            let result = analyze(raw, &guard, &render_client(&server), &mut session)
                .await
                .unwrap();
            assert!(matches!(result, Analysis::Empty));
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.get(LAST_QUERY_COOKIE), None);
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_outbound_calls() {
        let server = backend(0).await;
        let resolver = Arc::new(RefusingResolver::default());
        let guard = DnsGuard::new(resolver.clone());
        let mut session = MemorySession::new();

        for raw in ["not a url", "http://"] {
            let err = analyze(Some(raw), &guard, &render_client(&server), &mut session)
                .await
                .err()
                .unwrap();
            assert!(matches!(err, RelayError::InvalidUrl(_)));
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dns_failure_skips_render() {
        let server = backend(0).await;
        let resolver = Arc::new(RefusingResolver::default());
        let guard = DnsGuard::new(resolver.clone());
        let mut session = MemorySession::new();

        let err = analyze(
            Some("https://internal.example/admin"),
            &guard,
            &render_client(&server),
            &mut session,
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, RelayError::DnsResolutionFailed { .. }));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(last_analyzed_url(&session), None);
    }

    #[tokio::test]
    async fn test_success_records_session() {
        let server = backend(1).await;
        let mut session = MemorySession::new();

        let result = analyze(
            Some("https://example.com/pricing"),
            &DnsGuard::disabled(),
            &render_client(&server),
            &mut session,
        )
        .await
        .unwrap();
        assert!(matches!(result, Analysis::Rendered(_)));
        assert_eq!(
            last_analyzed_url(&session).as_deref(),
            Some("https://example.com/pricing")
        );
    }

    #[tokio::test]
    async fn test_backend_failure_leaves_session_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let mut session = MemorySession::new();
        crate::session::record_analyzed_url(&mut session, "https://previous.example");

        let err = analyze(
            Some("https://example.com"),
            &DnsGuard::disabled(),
            &render_client(&server),
            &mut session,
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, RelayError::RenderBackendError { .. }));
        assert_eq!(
            last_analyzed_url(&session).as_deref(),
            Some("https://previous.example")
        );
    }

    #[tokio::test]
    async fn test_repeated_analysis_renders_each_time() {
        let server = backend(2).await;
        let mut session = MemorySession::new();
        for _ in 0..2 {
            analyze(
                Some("https://example.com"),
                &DnsGuard::disabled(),
                &render_client(&server),
                &mut session,
            )
            .await
            .unwrap();
        }
        assert_eq!(
            last_analyzed_url(&session).as_deref(),
            Some("https://example.com")
        );
    }
}

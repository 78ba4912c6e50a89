//! Restricted DNS resolver initialization.
//!
//! The resolver talks to exactly one name server, the one the operator
//! configured. It never falls back to the system configuration or the hosts
//! file, makes a single attempt per query, and keeps no cache so every request
//! is checked against current DNS state.

use std::net::SocketAddr;
use std::sync::Arc;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::InitializationError;
use crate::security::DnsGuard;

/// Builds a resolver bound to `server` only.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `server` is unusable.
pub fn init_restricted_resolver(
    server: SocketAddr,
) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if server.port() == 0 {
        return Err(InitializationError::DnsResolverError(format!(
            "restricted DNS server {} has no port",
            server
        )));
    }

    let name_servers = NameServerConfigGroup::from_ips_clear(&[server.ip()], server.port(), true);
    let config = ResolverConfig::from_parts(None, vec![], name_servers);

    let mut opts = ResolverOpts::default();
    opts.attempts = 1;
    opts.cache_size = 0;
    opts.use_hosts_file = false;
    // Prevent search domain appending
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(config, opts)))
}

/// Builds the SSRF guard from the optional restricted server.
///
/// `None` yields a disabled guard.
pub fn init_dns_guard(server: Option<SocketAddr>) -> Result<DnsGuard, InitializationError> {
    match server {
        Some(server) => {
            log::info!("SSRF guard enabled: hosts must resolve via {}", server);
            Ok(DnsGuard::new(init_restricted_resolver(server)?))
        }
        None => {
            log::warn!("No restricted DNS server configured: SSRF guard disabled");
            Ok(DnsGuard::disabled())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_dns_guard_disabled_without_server() {
        let guard = init_dns_guard(None).unwrap();
        assert!(!guard.is_enabled());
    }

    #[tokio::test]
    async fn test_init_dns_guard_enabled_with_server() {
        let guard = init_dns_guard(Some("127.0.0.1:53".parse().unwrap())).unwrap();
        assert!(guard.is_enabled());
    }

    #[tokio::test]
    async fn test_init_restricted_resolver_rejects_port_zero() {
        let result = init_restricted_resolver("127.0.0.1:0".parse().unwrap());
        assert!(matches!(
            result,
            Err(InitializationError::DnsResolverError(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_resolver_fails_lookup() {
        use crate::security::HostResolver;

        // Nothing answers DNS on the discard port; the single attempt must fail
        let resolver = init_restricted_resolver("127.0.0.1:9".parse().unwrap()).unwrap();
        let result = resolver.lookup_ipv4("example.com").await;
        assert!(result.is_err());
    }
}

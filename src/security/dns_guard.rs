//! SSRF guard: host resolution scoped to a restricted DNS server.
//!
//! When the operator configures a resolver, every analyzed host must have an
//! A record through that resolver and only that resolver. One lookup per
//! request, no retries, no caching across requests. Without a configured
//! resolver the guard lets every host through.

use std::net::Ipv4Addr;
use std::sync::Arc;

use futures::future::BoxFuture;
use hickory_resolver::TokioAsyncResolver;
use log::{debug, warn};
use url::{Host, Url};

use crate::error_handling::RelayError;

/// A-record lookup used by the guard.
///
/// Implemented for hickory's `TokioAsyncResolver`; tests substitute their own.
pub trait HostResolver: Send + Sync {
    fn lookup_ipv4<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<Vec<Ipv4Addr>, String>>;
}

impl HostResolver for TokioAsyncResolver {
    fn lookup_ipv4<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<Vec<Ipv4Addr>, String>> {
        Box::pin(async move {
            let response = self.ipv4_lookup(host).await.map_err(|e| e.to_string())?;
            Ok(response.iter().map(|a| a.0).collect())
        })
    }
}

/// Outcome of a successful guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No restricted resolver is configured.
    Unrestricted,
    /// The host resolved through the restricted resolver.
    Resolved(Vec<Ipv4Addr>),
}

/// Gate in front of every outbound request made on a caller's behalf.
#[derive(Clone)]
pub struct DnsGuard {
    resolver: Option<Arc<dyn HostResolver>>,
}

impl DnsGuard {
    /// A guard that accepts every host.
    pub fn disabled() -> Self {
        Self { resolver: None }
    }

    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.resolver.is_some()
    }

    /// Checks that `url`'s host resolves through the restricted resolver.
    ///
    /// IP-literal hosts cannot be vouched for by a resolver and are rejected
    /// while the guard is enabled.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::DnsResolutionFailed` if the lookup errors or
    /// returns no A records.
    pub async fn check(&self, url: &Url) -> Result<Resolution, RelayError> {
        let Some(resolver) = &self.resolver else {
            return Ok(Resolution::Unrestricted);
        };

        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(ip)) => return Err(ip_literal_rejected(ip.to_string())),
            Some(Host::Ipv6(ip)) => return Err(ip_literal_rejected(ip.to_string())),
            None => {
                return Err(RelayError::DnsResolutionFailed {
                    host: String::new(),
                    reason: "URL has no host".into(),
                })
            }
        };

        match resolver.lookup_ipv4(&host).await {
            Ok(addrs) if addrs.is_empty() => {
                warn!("Restricted resolver returned no A records for {host}");
                Err(RelayError::DnsResolutionFailed {
                    host,
                    reason: "no A records".into(),
                })
            }
            Ok(addrs) => {
                debug!("{host} resolved to {:?} via restricted resolver", addrs);
                Ok(Resolution::Resolved(addrs))
            }
            Err(reason) => {
                warn!("Restricted resolution failed for {host}: {reason}");
                Err(RelayError::DnsResolutionFailed { host, reason })
            }
        }
    }
}

fn ip_literal_rejected(host: String) -> RelayError {
    warn!("Rejecting IP literal host {host}: restricted resolution requires a domain name");
    RelayError::DnsResolutionFailed {
        host,
        reason: "IP literal hosts cannot be checked against the restricted resolver".into(),
    }
}

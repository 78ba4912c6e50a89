//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through the environment,
//! keeping the variable names the relay has always been deployed with.

use std::net::{IpAddr, SocketAddr};

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_BIND_ADDR, DEFAULT_DNS_PORT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for log shippers
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Parses a restricted DNS server address.
///
/// Accepts either a bare IP (`9.9.9.9`, `2620:fe::fe`) which gets port 53, or a
/// full socket address (`9.9.9.9:5353`, `[2620:fe::fe]:53`).
pub fn parse_dns_server(value: &str) -> Result<SocketAddr, String> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    value
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| format!("'{}' is not an IP address or IP:port", value))
}

/// Command-line options for the relay binary.
///
/// # Examples
///
/// ```bash
/// # Minimal (SSRF guard disabled)
/// BROWSERLESS_HOST=https://chrome.example.com BROWSERLESS_TOKEN=secret render_proxy
///
/// # Restrict rendering to hosts the filtering resolver answers for
/// render_proxy --restricted-dns-server 10.0.0.53 --status-port 9090
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "render_proxy",
    about = "Renders external pages through a headless browser and relays their assets."
)]
pub struct Opt {
    /// Base URL of the headless rendering backend
    #[arg(long, env = "BROWSERLESS_HOST")]
    pub browserless_host: String,

    /// Access token for the rendering backend
    #[arg(long, env = "BROWSERLESS_TOKEN", hide_env_values = true)]
    pub browserless_token: String,

    /// DNS server used to vet hosts before rendering (IP or IP:port).
    ///
    /// When unset the SSRF guard is disabled and every syntactically valid
    /// URL is forwarded to the rendering backend.
    #[arg(long, env = "RESTRICTED_DNS_SERVER", value_parser = parse_dns_server)]
    pub restricted_dns_server: Option<SocketAddr>,

    /// Address the relay listens on
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// HTTP status server port (optional, disabled by default)
    #[arg(long, env = "STATUS_PORT")]
    pub status_port: Option<u16>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// Passed to each component at construction. `restricted_dns_server: None` is a
/// valid configuration: it disables the SSRF guard.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the rendering backend, e.g. `https://chrome.example.com`
    pub render_backend_host: String,

    /// Token appended to every render request
    pub render_backend_token: String,

    /// Resolver that every analyzed host must resolve through
    pub restricted_dns_server: Option<SocketAddr>,

    /// Listen address for the relay
    pub bind_addr: SocketAddr,

    /// HTTP status server port (optional, disabled by default)
    pub status_port: Option<u16>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render_backend_host: "http://127.0.0.1:3001".to_string(),
            render_backend_token: String::new(),
            restricted_dns_server: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            status_port: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            render_backend_host: opt.browserless_host,
            render_backend_token: opt.browserless_token,
            restricted_dns_server: opt.restricted_dns_server,
            bind_addr: opt.bind,
            status_port: opt.status_port,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_parse_dns_server_bare_ipv4_gets_default_port() {
        let addr = parse_dns_server("9.9.9.9").unwrap();
        assert_eq!(addr, "9.9.9.9:53".parse().unwrap());
    }

    #[test]
    fn test_parse_dns_server_with_port() {
        let addr = parse_dns_server("10.0.0.53:5353").unwrap();
        assert_eq!(addr.port(), 5353);
    }

    #[test]
    fn test_parse_dns_server_ipv6() {
        let addr = parse_dns_server("2620:fe::fe").unwrap();
        assert_eq!(addr.port(), 53);
        let addr = parse_dns_server("[2620:fe::fe]:5353").unwrap();
        assert_eq!(addr.port(), 5353);
    }

    #[test]
    fn test_parse_dns_server_rejects_hostnames() {
        // A resolver given by name would itself need resolving through the system default
        let err = parse_dns_server("dns.example.com").unwrap_err();
        assert!(err.contains("dns.example.com"));
    }

    #[test]
    fn test_opt_reads_required_flags() {
        let opt = Opt::try_parse_from([
            "render_proxy",
            "--browserless-host",
            "https://chrome.example.com",
            "--browserless-token",
            "secret",
            "--restricted-dns-server",
            "1.1.1.1",
        ])
        .unwrap();
        let config = Config::from(opt);
        assert_eq!(config.render_backend_host, "https://chrome.example.com");
        assert_eq!(config.render_backend_token, "secret");
        assert_eq!(
            config.restricted_dns_server,
            Some("1.1.1.1:53".parse().unwrap())
        );
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
    }

    #[test]
    fn test_opt_rejects_invalid_dns_server() {
        let result = Opt::try_parse_from([
            "render_proxy",
            "--browserless-host",
            "https://chrome.example.com",
            "--browserless-token",
            "secret",
            "--restricted-dns-server",
            "not-an-ip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_default_disables_guard() {
        let config = Config::default();
        assert!(config.restricted_dns_server.is_none());
        assert!(config.status_port.is_none());
    }
}

//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable first; the
/// provided `level` overrides it for this crate and as the global default.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=render_proxy=debug,hyper=info render_proxy
///
/// # JSON lines for log shippers
/// render_proxy --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("reqwest", LevelFilter::Info);
    // Malformed UDP answers are retried internally; keep their warnings out of the log
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("render_proxy", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so tests that initialize more than once don't panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_errors_instead_of_panicking() {
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        // Another test may have installed a logger first; at most one call can win
        assert!(!(first.is_ok() && second.is_ok()));
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}

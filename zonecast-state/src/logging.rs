//! Logging setup for applications embedding the engine.
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! application's choice. These helpers cover the common setups.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases.
#[derive(Debug, Clone, Copy)]
pub enum LoggingMode {
    /// No output.
    Silent,
    /// Compact stderr output for development.
    Development,
    /// Verbose diagnostics with source locations.
    Debug,
}

/// Logging configuration error.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global tracing subscriber for the given mode.
///
/// Call once, early, before constructing a
/// [`ZoneSystem`](crate::ZoneSystem).
///
/// # Environment Variables
///
/// - `ZONECAST_LOG_LEVEL`: override the filter (error, warn, info, debug,
///   trace, or any `EnvFilter` directive); falls back to `RUST_LOG`.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(env_filter("info"));
            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(env_filter("debug"));
            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Install a subscriber based on the `ZONECAST_LOG_MODE` environment
/// variable: "development", "debug", or anything else for silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("ZONECAST_LOG_MODE").as_deref() {
        Ok("development") => LoggingMode::Development,
        Ok("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    };
    init_logging(mode)
}

fn env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("ZONECAST_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}

/// Whether a global subscriber has already been installed.
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

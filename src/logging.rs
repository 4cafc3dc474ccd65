//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence; otherwise the configured filter applies.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Build the env filter for the given logging configuration
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| Error::Config(format!("Invalid log filter '{}': {}", config.filter, e)))
}

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config)?);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {}", e)))
}

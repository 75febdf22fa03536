//! Logging setup.
//!
//! The library crates log through the `log` facade; [`init`] installs a
//! `tracing-subscriber` formatter and forwards those records into it.

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter {directive:?}: {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

/// `RUST_LOG` wins over the configured level.
pub fn filter_for(config: &LogConfig, rust_log: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let directive = rust_log
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(config.level.as_str());
    EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(config, rust_log.as_deref())?;

    let builder = fmt().with_env_filter(filter).with_target(true);
    let result = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(format = %config.format, "logging initialised");
    Ok(())
}

//! Structured logging setup using tracing.
//!
//! JSON output is the default so request logs can be shipped to an aggregator;
//! the pretty formatter is meant for local development.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Error returned when the global subscriber cannot be installed
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level` when it is set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(&config.level)?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "pretty" {
        registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .flatten_event(true),
            )
            .try_init()?;
    }

    tracing::info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|source| LoggingError::Filter {
            filter: level.to_string(),
            source,
        }),
    }
}

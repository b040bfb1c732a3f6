use crate::utils::error::{KrogerError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("kroger_api=debug,info")
        } else {
            EnvFilter::new("kroger_api=info")
        }
    })
}

/// Installs a compact human-readable subscriber. Fails if one is already set.
pub fn init_logger(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| KrogerError::ConfigError {
            message: format!("logger already initialized: {}", e),
        })
}

/// Installs a JSON subscriber for log aggregation.
pub fn init_json_logger() -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .try_init()
        .map_err(|e| KrogerError::ConfigError {
            message: format!("logger already initialized: {}", e),
        })
}

//! Logging subscriber initialisation.

use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::LoggingSettings;

/// Initialises the global tracing subscriber: a compact fmt layer behind
/// an env filter, defaulting to the configured level when `RUST_LOG` is
/// not set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_subscriber(config: &LoggingSettings) -> Result<(), TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config))
        .try_init()
}

fn build_env_filter(config: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()))
}

//! # Logging
//!
//! Tracing subscriber setup. Logs go to stderr so stdout only carries the
//! rendered manifest.

use crate::config::RendererConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured log level.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &RendererConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.json_logs() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

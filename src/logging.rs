//! Tracing subscriber setup driven by [`LoggingConfig`]

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

const VERBOSE_LEVEL: &str = "debug";

/// Build the filter. Precedence: `verbose`, then `RUST_LOG`, then the
/// configured level.
#[must_use]
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_LEVEL);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Logs go to stderr so the rendered widget
/// owns stdout.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, verbose))
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}

//! Tracing bootstrap for hosts that do not install their own subscriber.

use oprah_config::OprahConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides every configured filter.
pub const LOG_ENV: &str = "OPRAH_LOG";

/// Install a `fmt` subscriber filtered by `OPRAH_LOG`, else by the config.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &OprahConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}

fn default_directives(config: &OprahConfig) -> &str {
    if config.debug {
        "oprah=debug"
    } else {
        &config.general.log_filter
    }
}

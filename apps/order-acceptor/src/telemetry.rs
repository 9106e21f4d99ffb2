//! Tracing Setup
//!
//! Console logging through `tracing-subscriber`.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives; takes precedence when set
//! - `observability.log_level` in the config file otherwise
//! - `NODE_ENV=development`: ANSI colors on, targets off
//!
//! Logs go to stderr so stdout stays free for outbound messages.

use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
#[must_use]
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize console tracing.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let is_development = std::env::var("NODE_ENV")
        .map(|v| v == "development")
        .unwrap_or(false);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(!is_development)
        .with_ansi(is_development)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

//! Tracing subscriber setup.
//!
//! A single `tracing_subscriber::fmt()...init()` call, switched between
//! JSON and human-readable output by `NODE_ENV`.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Initialize the global tracing subscriber.
///
/// Uses `LOG_LEVEL` (falling back to `RUST_LOG`, then `info`) to build the
/// `EnvFilter`, and switches between JSON and human-readable console output
/// based on `NODE_ENV=production`.
pub fn init(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_production() {
        builder.json().with_current_span(false).init();
    } else {
        builder.with_target(false).init();
    }
}

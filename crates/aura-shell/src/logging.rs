//! # Logging
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! `RUST_LOG` wins when set; otherwise the configured filter applies
//! (`logging.filter` in nav.toml, or `AURA_LOG`).

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber. Returns `false` if one was already set,
/// which is harmless (tests and embedding hosts often install their own).
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

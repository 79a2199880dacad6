//! Logging setup for hosts embedding the core.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber filtered by `RUST_LOG`. Safe to call more
/// than once; later calls are no-ops because a global subscriber may already
/// be set by the host.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

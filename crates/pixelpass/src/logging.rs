//! Log output for binaries built on pixelpass.

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to
/// `info`.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with `default_filter` used when `RUST_LOG` is unset or
/// invalid. Does nothing if a global subscriber is already installed.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

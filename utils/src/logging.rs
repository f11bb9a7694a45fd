//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber for an engine host process.
///
/// Filtering follows the `RUST_LOG` environment variable, so a chain
/// processor can surface the engine's reconstruction progress with e.g.
/// `RUST_LOG=signet_consensus=info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Install a subscriber that routes output through the test harness.
///
/// Safe to call from every test; only the first call installs, later
/// calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

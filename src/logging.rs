//! Log setup for test binaries.

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber that writes through libtest's captured output.
///
/// The filter comes from `RUST_LOG`, defaulting to `warn` (exhausted counters). Set `RUST_LOG=testout=debug` to see
/// every created directory and allocated path. Safe to call from every test: only the first call installs anything.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber, filtered through `RUST_LOG` (default: `info`).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr, so they never mix with the CSV on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

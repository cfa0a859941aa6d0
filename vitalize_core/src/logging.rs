//! Logging infrastructure for Vitalize.
//!
//! Centralized tracing setup shared by the server and CLI binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at the default INFO level
///
/// The `RUST_LOG` environment variable overrides the default.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// Uses environment-based filtering (`RUST_LOG`) with compact,
/// terminal-friendly output.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Admiral tracing/logging system.
///
/// Reads `ADMIRAL_LOG` for per-subsystem log levels, e.g.
/// `ADMIRAL_LOG=admiral_storage=debug,admiral_hierarchy=info`.
/// Falls back to `admiral=info` if unset or invalid.
///
/// Output goes to stderr so projections written to stdout stay clean.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ADMIRAL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("admiral=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}

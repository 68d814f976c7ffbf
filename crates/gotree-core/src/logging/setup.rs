//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the gotree tracing/logging system.
///
/// Reads the `GOTREE_LOG` environment variable as an `EnvFilter` directive,
/// e.g. `GOTREE_LOG=gotree_convert::mapper=debug,warn`.
/// Falls back to `warn` when unset or invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    install(filter);
}

/// Initialize tracing with an explicit filter directive (tests, embedding).
pub fn init_tracing_with_filter(directive: &str) {
    install(EnvFilter::new(directive));
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        // A subscriber installed by the host process takes precedence.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}

//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "BUBBLEWRAP_LOG";

/// Initialize logging with the default `bubblewrap=info` filter.
///
/// Reads `BUBBLEWRAP_LOG` for per-module log levels, e.g.
/// `BUBBLEWRAP_LOG=bubblewrap_core::execution=debug,bubblewrap_core::coverage=warn`.
pub fn init_tracing() {
    init_tracing_with_default("bubblewrap=info,bubblewrap_core=info");
}

/// Initialize logging, falling back to `default_directives` when
/// `BUBBLEWRAP_LOG` is unset or invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing_with_default(default_directives: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directives));

        // A subscriber installed elsewhere (e.g. by a test harness) wins.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .try_init();
    });
}

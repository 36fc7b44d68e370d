//! Diagnostic logging.
//!
//! The library only emits `tracing` events; clients decide where they go. The
//! CLI calls [`init`] once at startup, which installs a stderr subscriber
//! filtered by `TODOZ_LOG` (standard `EnvFilter` syntax). Without it the
//! level is `warn`, or `debug` with `--verbose`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "TODOZ_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "todoz=debug"
    } else {
        "todoz=warn"
    }
}

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    }
}

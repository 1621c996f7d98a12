//! Tracing setup for binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "STRIDE_LOG";

/// Install a stderr subscriber filtered by `STRIDE_LOG`.
///
/// Without the variable the filter is `warn`, or `debug` when `verbose`.
/// Calling this more than once is harmless.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

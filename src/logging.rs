//! Logging setup for the binary.
//!
//! Diagnostics go to stderr through `tracing`; user-facing status lines are
//! printed by [crate::ui] and never routed through the logger.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "TAGBUMP_LOG";

/// Filter directive used when `TAGBUMP_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "tagbump=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
///
/// `--verbose` wins over `TAGBUMP_LOG`. Calling this twice is harmless; the
/// second subscriber is silently dropped.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

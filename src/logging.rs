//! Tracing subscriber setup for the notevault binary.
//!
//! Output goes to stderr so stdout stays clean for listings and fetched blobs.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding `EnvFilter` directives
pub const LOG_ENV: &str = "NOTEVAULT_LOG";

/// Directive used when `NOTEVAULT_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "notevault=debug"
    } else {
        "notevault=warn"
    }
}

/// Install the global subscriber. Call once, early in `main()`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

//! Tracing subscriber set-up
//!
//! Logs go to stderr so a script printed to stdout stays clean.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "NODEFETCH_LOG";

/// Filter directive: `NODEFETCH_LOG`, else debug with `--verbose`, else warn
pub fn filter_directive(verbose: bool) -> String {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => "nodefetch=debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_new(filter_directive(verbose))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}

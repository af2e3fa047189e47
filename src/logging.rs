//! Diagnostic tracing to stderr.
//!
//! Workflow annotations on stdout are the user-facing log; this layer carries
//! the detail underneath it (spawned commands, state changes, byte counts).

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter: warnings only, or debug for this crate with `-v`.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "compose_deploy=debug"
    } else {
        "compose_deploy=warn"
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

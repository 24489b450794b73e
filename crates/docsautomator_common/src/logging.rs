//! Logging utilities for the DocsAutomator workspace.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! host's job. The backend calls [`init`] at startup, tests install their own
//! subscriber with `tracing::subscriber::set_default`.

use tracing::{error, info, Level};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Crate targets whose events are enabled at the requested level.
const TARGETS: [&str; 4] = [
    "docsautomator_node",
    "docsautomator_common",
    "docsautomator_config",
    "docsautomator_backend",
];

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; the workspace crates are additionally enabled at
/// `level`. Calling this twice is harmless.
pub fn init_with_level(level: Level) {
    let filter = TARGETS
        .iter()
        .filter_map(|target| format!("{}={}", target, level).parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive)
        });

    // try_init: a global subscriber may already be set (tests, embedding hosts)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log a result, INFO on success and ERROR with context on failure, and
/// return it unchanged.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}

//! Diagnostics for the `plugin` binary.
//!
//! Stdout carries only command output (info sets, alias sets, listings and
//! resolved trees) so that it can be piped into other tools or compared in
//! tests. Every log line therefore goes to stderr.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used by `--verbose`, regardless of `RUST_LOG`.
const VERBOSE: &str = "debug";

/// Picks the log filter for this run, or `None` to stay silent.
///
/// `--verbose` wins; otherwise logging is on only when `RUST_LOG` is set.
pub fn filter(verbose: bool, rust_log: Option<&str>) -> Result<Option<EnvFilter>, String> {
    let directives = match (verbose, rust_log) {
        (true, _) => VERBOSE,
        (false, Some(directives)) => directives,
        (false, None) => return Ok(None),
    };
    EnvFilter::try_new(directives)
        .map(Some)
        .map_err(|e| format!("invalid log filter {directives:?}: {e}"))
}

/// Installs a compact stderr subscriber when [`filter`] asks for one.
pub fn init(verbose: bool) -> Result<(), String> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let Some(filter) = filter(verbose, rust_log.as_deref())? else {
        return Ok(());
    };

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .try_init()
        .map_err(|e| format!("failed to set up logging: {e}"))?;

    tracing::debug!(verbose, "logging to stderr");
    Ok(())
}

//! Diagnostic tracing for the migrator.
//!
//! # Two output channels
//!
//! - **Operator report (stdout)**: prompts, the action summary, the
//!   success/failure reports and the test summary. Built in [`crate::report`]
//!   and written by [`crate::orchestrator`] through an injected `Write`.
//!   Always shown, unaffected by `RUST_LOG`. The patch script and test runner
//!   write to the same terminal directly.
//!
//! - **Tracing (this module, stderr)**: phase decisions, `PATH` lookups,
//!   spawn/exit details and timeouts. Off below `warn` unless `RUST_LOG` asks
//!   for more, so piped stdout stays a clean transcript of the run.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=migrator=debug migrator
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

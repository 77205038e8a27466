//! Interactive gate for a one-time project layout migration.
//!
//! The migration itself is performed by an external patch script. This crate
//! only decides whether that script may run and reports what happened:
//!
//! - **[`core`]**: Pure phase logic (marker checks, answer parsing, exit
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting adapters (config file, operator prompts,
//!   child processes). Trait-based so tests can script them.
//! - **[`report`]**: Operator-facing text.
//!
//! [`orchestrator`] sequences the phases and maps the terminal state to an
//! exit code.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod orchestrator;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

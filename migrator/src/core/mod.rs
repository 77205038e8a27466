//! Deterministic phase logic for the migration gate.
//!
//! Core modules must be free of I/O side effects. Filesystem and `PATH`
//! lookups are passed in as closures so every phase can be tested on plain
//! in-memory data.

pub mod phases;
pub mod types;

//! I/O adapters for the migrator.

pub mod config;
pub mod process;
pub mod prompt;

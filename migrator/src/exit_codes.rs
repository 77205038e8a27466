//! Stable exit codes for the `migrator` binary.

/// Migration succeeded, or the operator declined to run it.
pub const OK: i32 = 0;
/// Missing interpreter, no project markers, missing patch script, patch
/// script failure, or an internal error (bad config, broken stdin/stdout).
pub const FAILURE: i32 = 1;

//! Phase results and the terminal outcome of a migration run.

use std::path::PathBuf;

use crate::exit_codes;

/// Whether the interpreter that runs the patch script is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentResult {
    Found(PathBuf),
    Missing { interpreter: String },
}

/// Whether the working directory looks like the expected project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionResult {
    /// At least one marker exists. `found` lists them in configured order.
    Satisfied { found: Vec<String> },
    /// None of the `expected` markers exist.
    NoMarkers { expected: Vec<String> },
}

/// Operator answer to a yes/no prompt. Anything but an explicit yes is a decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    Accepted,
    Declined,
}

/// Whether the patch script exists at its expected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegatePresence {
    Present(PathBuf),
    Missing(PathBuf),
}

/// Result of running the patch script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateResult {
    Succeeded,
    /// Non-zero exit. `code` is `None` when the child was killed by a signal
    /// or could not be spawned.
    Failed { code: Option<i32> },
}

/// Result of the optional post-migration test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestRunResult {
    /// Operator declined the test prompt.
    Skipped,
    /// The test runner was missing and could not be installed or started.
    Unavailable,
    Passed,
    Failed { code: Option<i32> },
}

/// Terminal state reached by a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    EnvironmentMissing,
    NoMarkers,
    Declined,
    DelegateMissing,
    DelegateFailed { code: Option<i32> },
    Succeeded { tests: TestRunResult },
}

impl MigrationOutcome {
    /// Process exit code for this outcome.
    ///
    /// A declined prompt is not an error. The test run never changes the code
    /// once the patch script has succeeded.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Declined | Self::Succeeded { .. } => exit_codes::OK,
            Self::EnvironmentMissing
            | Self::NoMarkers
            | Self::DelegateMissing
            | Self::DelegateFailed { .. } => exit_codes::FAILURE,
        }
    }

    /// True if the run got far enough to start the patch script.
    pub fn delegate_invoked(&self) -> bool {
        matches!(
            self,
            Self::DelegateFailed { .. } | Self::Succeeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decline_and_success_exit_zero() {
        assert_eq!(MigrationOutcome::Declined.exit_code(), exit_codes::OK);
        let failed_tests = MigrationOutcome::Succeeded {
            tests: TestRunResult::Failed { code: Some(1) },
        };
        assert_eq!(failed_tests.exit_code(), exit_codes::OK);
    }

    #[test]
    fn fatal_outcomes_exit_one() {
        for outcome in [
            MigrationOutcome::EnvironmentMissing,
            MigrationOutcome::NoMarkers,
            MigrationOutcome::DelegateMissing,
            MigrationOutcome::DelegateFailed { code: Some(3) },
            MigrationOutcome::DelegateFailed { code: None },
        ] {
            assert_eq!(outcome.exit_code(), exit_codes::FAILURE, "{outcome:?}");
        }
    }

    #[test]
    fn delegate_invoked_only_after_spawn() {
        assert!(!MigrationOutcome::NoMarkers.delegate_invoked());
        assert!(!MigrationOutcome::Declined.delegate_invoked());
        assert!(!MigrationOutcome::DelegateMissing.delegate_invoked());
        assert!(MigrationOutcome::DelegateFailed { code: Some(1) }.delegate_invoked());
        assert!(
            MigrationOutcome::Succeeded {
                tests: TestRunResult::Skipped
            }
            .delegate_invoked()
        );
    }
}

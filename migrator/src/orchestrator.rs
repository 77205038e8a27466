//! Sequencing for a migration run.
//!
//! The run is linear: environment, project markers, operator consent, patch
//! script presence, patch script, report, optional tests. Each phase returns
//! a typed result from [`crate::core::phases`]; this module only matches on
//! those results and decides where to stop. It never writes to the project
//! itself, so every early exit leaves the filesystem as it found it.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::phases::{
    check_delegate, check_environment, check_preconditions, classify_exit, classify_test_exit,
};
use crate::core::types::{
    ConfirmationResult, DelegatePresence, DelegateResult, EnvironmentResult, MigrationOutcome,
    PreconditionResult, TestRunResult,
};
use crate::io::config::MigratorConfig;
use crate::io::process::{LaunchRequest, Launcher};
use crate::io::prompt::Prompter;
use crate::report;

pub const CONFIRM_QUESTION: &str = "Apply the migration patch?";
pub const TESTS_QUESTION: &str = "Run the compatibility tests?";

/// Run the migration gate in `root`.
///
/// Classified stops (declined, missing markers, patch failure, ...) come back
/// as a [`MigrationOutcome`]. `Err` is reserved for broken I/O on the
/// operator's terminal.
pub fn run_migration<P, L, W>(
    root: &Path,
    config: &MigratorConfig,
    prompter: &mut P,
    launcher: &L,
    out: &mut W,
) -> Result<MigrationOutcome>
where
    P: Prompter,
    L: Launcher,
    W: Write,
{
    debug!(root = %root.display(), "starting migration gate");

    match check_environment(&config.interpreter, |program| launcher.locate(program)) {
        EnvironmentResult::Found(path) => {
            debug!(interpreter = %path.display(), "interpreter found");
        }
        EnvironmentResult::Missing { interpreter } => {
            warn!(interpreter = %interpreter, "interpreter missing");
            say(out, &report::interpreter_missing(&interpreter))?;
            return Ok(MigrationOutcome::EnvironmentMissing);
        }
    }

    match check_preconditions(root, &config.markers, Path::exists) {
        PreconditionResult::Satisfied { found } => {
            say(out, &report::markers_found(&found))?;
        }
        PreconditionResult::NoMarkers { expected } => {
            warn!(?expected, "no project markers found");
            say(out, &report::no_markers(&expected))?;
            return Ok(MigrationOutcome::NoMarkers);
        }
    }

    say(out, &report::confirmation_summary(config))?;
    if prompter.confirm(CONFIRM_QUESTION)? == ConfirmationResult::Declined {
        info!("operator declined migration");
        say(out, &report::declined())?;
        return Ok(MigrationOutcome::Declined);
    }

    let delegate_path = match check_delegate(root.join(&config.delegate), Path::exists) {
        DelegatePresence::Present(path) => path,
        DelegatePresence::Missing(path) => {
            warn!(delegate = %path.display(), "patch script missing");
            say(out, &report::delegate_missing(&config.delegate))?;
            return Ok(MigrationOutcome::DelegateMissing);
        }
    };
    debug!(delegate = %delegate_path.display(), "patch script found");

    let request = LaunchRequest::new(
        config.interpreter.as_str(),
        std::slice::from_ref(&config.delegate),
        root,
    )
    .with_timeout(delegate_timeout(config));
    say(out, &report::running(&request.display()))?;

    let result = match launcher.run(&request) {
        Ok(launch) if launch.timed_out => {
            warn!("patch script timed out");
            DelegateResult::Failed { code: None }
        }
        Ok(launch) => classify_exit(launch.code),
        Err(err) => {
            warn!(err = ?err, "patch script could not be started");
            say(out, &format!("error: {err:#}\n"))?;
            DelegateResult::Failed { code: None }
        }
    };

    match result {
        DelegateResult::Failed { code } => {
            warn!(exit_code = ?code, "patch script failed");
            say(out, &report::failure_report(config, code))?;
            Ok(MigrationOutcome::DelegateFailed { code })
        }
        DelegateResult::Succeeded => {
            info!("patch script succeeded");
            say(out, &report::success_report(config))?;
            let tests = offer_tests(root, config, prompter, launcher, out)?;
            Ok(MigrationOutcome::Succeeded { tests })
        }
    }
}

fn offer_tests<P, L, W>(
    root: &Path,
    config: &MigratorConfig,
    prompter: &mut P,
    launcher: &L,
    out: &mut W,
) -> Result<TestRunResult>
where
    P: Prompter,
    L: Launcher,
    W: Write,
{
    say(out, "\n")?;
    let tests = match prompter.confirm(TESTS_QUESTION)? {
        ConfirmationResult::Declined => TestRunResult::Skipped,
        ConfirmationResult::Accepted => run_tests(root, config, launcher, out)?,
    };
    say(out, &report::test_summary(tests))?;
    Ok(tests)
}

/// Install the test runner if needed, then run it. Failures here are
/// reported, never propagated: the migration has already succeeded.
fn run_tests<L, W>(
    root: &Path,
    config: &MigratorConfig,
    launcher: &L,
    out: &mut W,
) -> Result<TestRunResult>
where
    L: Launcher,
    W: Write,
{
    let tests = &config.tests;
    if launcher.locate(&tests.runner).is_none() {
        let command = config.install_command();
        let Some((program, args)) = command.split_first() else {
            warn!("no install command configured");
            return Ok(TestRunResult::Unavailable);
        };
        let install = LaunchRequest::new(program.as_str(), args, root);
        say(
            out,
            &report::installing_test_runner(&tests.runner, &install.display()),
        )?;
        match launcher.run(&install) {
            Ok(launch) if launch.success() => {
                info!(runner = %tests.runner, "test runner installed");
            }
            Ok(launch) => {
                warn!(exit_code = ?launch.code, "test runner install failed");
                return Ok(TestRunResult::Unavailable);
            }
            Err(err) => {
                warn!(err = ?err, "test runner install could not be started");
                return Ok(TestRunResult::Unavailable);
            }
        }
    }

    let mut args = vec![tests.dir.clone()];
    args.extend(tests.args.iter().cloned());
    let request = LaunchRequest::new(tests.runner.as_str(), &args, root);
    say(out, &report::running(&request.display()))?;
    match launcher.run(&request) {
        Ok(launch) => Ok(classify_test_exit(launch.code)),
        Err(err) => {
            warn!(err = ?err, "test runner could not be started");
            Ok(TestRunResult::Unavailable)
        }
    }
}

fn delegate_timeout(config: &MigratorConfig) -> Option<Duration> {
    match config.delegate_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

fn say<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).context("write report")?;
    out.flush().context("flush report")
}

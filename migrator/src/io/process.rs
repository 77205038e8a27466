//! Child process helpers: `PATH` lookup and runs with inherited stdio.
//!
//! The patch script and the test runner talk to the operator directly, so
//! their stdin/stdout/stderr are inherited rather than captured. Only the
//! exit code comes back.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// A program to run, with arguments, in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
    /// Kill the child after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl LaunchRequest {
    pub fn new(program: impl Into<String>, args: &[String], workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: args.to_vec(),
            workdir: workdir.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shell-like rendering for messages, e.g. `python3 migration_patch.py`.
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// How a launched child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// `None` if the child was terminated by a signal.
    pub code: Option<i32>,
    pub timed_out: bool,
}

impl LaunchOutcome {
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            timed_out: false,
        }
    }

    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }
}

/// Abstraction over spawning external programs.
pub trait Launcher {
    /// Resolve `program` on `PATH` (or as a path).
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run the request to completion with inherited stdio.
    fn run(&self, request: &LaunchRequest) -> Result<LaunchOutcome>;
}

/// Launcher that spawns real processes.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        let found = which::which(program).ok();
        debug!(program, found = ?found, "path lookup");
        found
    }

    #[instrument(skip_all, fields(program = %request.program, timeout_secs = request.timeout.map(|t| t.as_secs())))]
    fn run(&self, request: &LaunchRequest) -> Result<LaunchOutcome> {
        run_inherited(request)
    }
}

/// Spawn `request` with inherited stdio and wait for it.
///
/// With a timeout, the child is killed on expiry and reported as timed out.
pub fn run_inherited(request: &LaunchRequest) -> Result<LaunchOutcome> {
    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args)
        .current_dir(&request.workdir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!(workdir = %request.workdir.display(), "spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).with_context(|| format!("spawn {}", request.display()));
        }
    };

    let (status, timed_out) = match request.timeout {
        Some(timeout) => match child.wait_timeout(timeout).context("wait for command")? {
            Some(status) => (status, false),
            None => {
                warn!(
                    timeout_secs = timeout.as_secs(),
                    "command timed out, killing"
                );
                child.kill().context("kill command")?;
                (child.wait().context("wait command after kill")?, true)
            }
        },
        None => (child.wait().context("wait for command")?, false),
    };

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(LaunchOutcome {
        code: status.code(),
        timed_out,
    })
}

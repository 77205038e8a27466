//! Test-only helpers: scripted prompts, scripted launches, temp projects.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::core::phases::parse_answer;
use crate::core::types::ConfirmationResult;
use crate::io::config::MigratorConfig;
use crate::io::process::{LaunchOutcome, LaunchRequest, Launcher};
use crate::io::prompt::Prompter;

/// Prompter that replays canned answers and records every question.
///
/// Running out of answers behaves like a closed stdin (decline).
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Vec::new(),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> Result<ConfirmationResult> {
        self.questions.push(question.to_string());
        Ok(self
            .answers
            .pop_front()
            .map_or(ConfirmationResult::Declined, |answer| parse_answer(&answer)))
    }
}

/// Launcher that returns queued outcomes in order and records requests.
///
/// Every program is found on `PATH` unless listed via `without_programs`.
/// An empty queue makes `run` fail like a spawn error.
pub struct ScriptedLauncher {
    outcomes: RefCell<VecDeque<LaunchOutcome>>,
    requests: RefCell<Vec<LaunchRequest>>,
    missing: Vec<String>,
}

impl ScriptedLauncher {
    pub fn new(outcomes: Vec<LaunchOutcome>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            requests: RefCell::new(Vec::new()),
            missing: Vec::new(),
        }
    }

    pub fn without_programs(mut self, programs: &[&str]) -> Self {
        self.missing = programs.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.borrow().clone()
    }
}

impl Launcher for ScriptedLauncher {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing.iter().any(|m| m == program) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(program))
        }
    }

    fn run(&self, request: &LaunchRequest) -> Result<LaunchOutcome> {
        self.requests.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("spawn {}: no scripted outcome", request.display()))
    }
}

/// Temporary project root with the default migrator config.
pub struct TestProject {
    dir: tempfile::TempDir,
    config: MigratorConfig,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create temp project")?,
            config: MigratorConfig::default(),
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MigratorConfig {
        &mut self.config
    }

    pub fn write_marker(&self, name: &str) -> Result<()> {
        self.write_file(name, "# marker\n")
    }

    /// Write a placeholder patch script at the configured delegate path.
    pub fn write_delegate(&self) -> Result<()> {
        self.write_file(&self.config.delegate, "print('patched')\n")
    }

    pub fn write_file(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.root().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Sorted top-level entry names, for before/after comparisons.
    pub fn listing(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root()).context("read project dir")? {
            let entry = entry.context("read entry")?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

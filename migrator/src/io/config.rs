//! Migrator configuration read from `migrator.toml` in the project root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "migrator.toml";

/// Migrator configuration (TOML).
///
/// Every field is optional. A missing file yields the defaults, which match
/// the trading bot layout the patch script was written for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigratorConfig {
    /// Interpreter used to run the patch script (looked up on `PATH`).
    pub interpreter: String,

    /// Files whose presence marks the project root. One is enough.
    pub markers: Vec<String>,

    /// Patch script path, relative to the project root.
    pub delegate: String,

    /// Where the patch script puts its backup. Only used in messages.
    pub backup_dir: String,

    /// Kill the patch script after this many seconds. `0` waits forever.
    pub delegate_timeout_secs: u64,

    pub tests: TestsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestsConfig {
    /// Test runner executable (looked up on `PATH`).
    pub runner: String,

    /// Test directory passed as the first argument.
    pub dir: String,

    /// Extra arguments after `dir`.
    pub args: Vec<String>,

    /// Command that installs the runner when it is not on `PATH`.
    /// Empty means `<interpreter> -m pip install <runner>`.
    pub install: Vec<String>,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            runner: "pytest".to_string(),
            dir: "tests/".to_string(),
            args: vec!["-v".to_string()],
            install: Vec::new(),
        }
    }
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            markers: ["bot.py", "hybrid_bot.py", "config.py"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            delegate: "migration_patch.py".to_string(),
            backup_dir: "backup_before_migration".to_string(),
            delegate_timeout_secs: 0,
            tests: TestsConfig::default(),
        }
    }
}

impl MigratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            return Err(anyhow!("interpreter must be non-empty"));
        }
        if self.markers.is_empty() || self.markers.iter().any(|m| m.trim().is_empty()) {
            return Err(anyhow!("markers must be a non-empty array of file names"));
        }
        if self.delegate.trim().is_empty() {
            return Err(anyhow!("delegate must be non-empty"));
        }
        if self.backup_dir.trim().is_empty() {
            return Err(anyhow!("backup_dir must be non-empty"));
        }
        if self.tests.runner.trim().is_empty() {
            return Err(anyhow!("tests.runner must be non-empty"));
        }
        if self.tests.install.first().is_some_and(|p| p.trim().is_empty()) {
            return Err(anyhow!("tests.install must start with a program"));
        }
        Ok(())
    }

    /// Command that installs the test runner, falling back to pip under the
    /// configured interpreter.
    pub fn install_command(&self) -> Vec<String> {
        if !self.tests.install.is_empty() {
            return self.tests.install.clone();
        }
        vec![
            self.interpreter.clone(),
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            self.tests.runner.clone(),
        ]
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `MigratorConfig::default()`.
pub fn load_config(path: &Path) -> Result<MigratorConfig> {
    if !path.exists() {
        let cfg = MigratorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MigratorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate().with_context(|| format!("invalid {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(cfg, MigratorConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "interpreter = \"sh\"\ndelegate = \"patch.sh\"\n\n[tests]\nrunner = \"true\"\n",
        )
        .expect("write config");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.interpreter, "sh");
        assert_eq!(cfg.delegate, "patch.sh");
        assert_eq!(cfg.tests.runner, "true");
        assert_eq!(cfg.tests.dir, "tests/");
        assert_eq!(cfg.markers, MigratorConfig::default().markers);
    }

    #[test]
    fn empty_markers_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "markers = []\n").expect("write config");

        let err = load_config(&path).expect_err("empty markers");
        assert!(format!("{err:#}").contains("markers"));
    }

    #[test]
    fn install_command_follows_interpreter_unless_set() {
        let mut cfg = MigratorConfig::default();
        assert_eq!(
            cfg.install_command(),
            vec!["python3", "-m", "pip", "install", "pytest"]
        );

        cfg.interpreter = "/opt/venv/bin/python".to_string();
        assert_eq!(
            cfg.install_command(),
            vec!["/opt/venv/bin/python", "-m", "pip", "install", "pytest"]
        );

        cfg.tests.install = vec!["uv".to_string(), "pip".to_string(), "install".to_string()];
        assert_eq!(cfg.install_command(), vec!["uv", "pip", "install"]);
    }

    #[test]
    fn blank_install_program_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[tests]\ninstall = [\" \", \"pytest\"]\n").expect("write config");

        let err = load_config(&path).expect_err("blank program");
        assert!(format!("{err:#}").contains("tests.install"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "interpreter = [").expect("write config");

        assert!(load_config(&path).is_err());
    }
}

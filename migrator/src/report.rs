//! Operator-facing messages.
//!
//! Every function returns the full text of one labeled block so the driver
//! stays a sequence of "check, then say". Nothing here touches stdout.

use crate::core::types::TestRunResult;
use crate::io::config::MigratorConfig;

const RULE: &str = "============================================================";

fn render_block(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_banner(title: &str) -> [String; 3] {
    [RULE.to_string(), title.to_string(), RULE.to_string()]
}

/// Header plus the list of actions the patch script will take.
pub fn confirmation_summary(config: &MigratorConfig) -> String {
    let mut lines = render_banner("PROJECT LAYOUT MIGRATION").to_vec();
    lines.extend([
        format!("The patch script ({}) will:", config.delegate),
        "  - create the new src/ directory layout".to_string(),
        format!("  - back up existing files to {}/", config.backup_dir),
        "  - create compatibility adapters for the legacy bot".to_string(),
        format!("  - add tests under {}", config.tests.dir),
        "  - update documentation".to_string(),
        "  - replace main.py (previous version kept as main_old.py)".to_string(),
    ]);
    render_block(&lines)
}

pub fn interpreter_missing(interpreter: &str) -> String {
    format!(
        "error: {interpreter} not found on PATH\n\
         hint: install it or set `interpreter` in migrator.toml\n"
    )
}

pub fn no_markers(expected: &[String]) -> String {
    format!(
        "error: this does not look like the bot project root (none of {} found)\n\
         hint: run the migration from the directory that contains the bot\n",
        expected.join(", ")
    )
}

pub fn markers_found(found: &[String]) -> String {
    format!("Project files found: {}\n", found.join(", "))
}

pub fn declined() -> String {
    "Migration cancelled. Nothing was changed.\n".to_string()
}

pub fn delegate_missing(delegate: &str) -> String {
    format!(
        "error: patch script {delegate} not found\n\
         hint: place {delegate} in the project root and run again\n"
    )
}

pub fn running(command: &str) -> String {
    format!("Running {command}...\n\n")
}

/// Next steps, run modes, backup location and documentation pointers.
pub fn success_report(config: &MigratorConfig) -> String {
    let python = &config.interpreter;
    let mut lines = vec![String::new()];
    lines.extend(render_banner("MIGRATION COMPLETED SUCCESSFULLY"));
    lines.extend([
        String::new(),
        "Next steps:".to_string(),
        format!("  1. Validate configuration:  {python} main.py --validate"),
        "  2. Install dependencies:    pip install -r requirements.txt".to_string(),
        format!("  3. Run the bot:             {python} main.py --mode hybrid"),
        String::new(),
        "Run modes (--mode):".to_string(),
        "  hybrid   new architecture driving the legacy bot through adapters (default)"
            .to_string(),
        "  new      new architecture only".to_string(),
        "  legacy   previous bot, unchanged".to_string(),
        "Profiles (--profile): conservative, balanced (default), aggressive".to_string(),
        "Dry run without real orders: --test-mode".to_string(),
        String::new(),
        "Backups:".to_string(),
        format!("  {}/  original files", config.backup_dir),
        "  main_old.py  previous entry point".to_string(),
        String::new(),
        "Documentation:".to_string(),
        "  README_NEW.md  new architecture overview".to_string(),
        "  docs/          API and configuration guides".to_string(),
    ]);
    render_block(&lines)
}

/// Failure banner with recovery guidance. The orchestrator never rolls back.
pub fn failure_report(config: &MigratorConfig, code: Option<i32>) -> String {
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated without an exit code".to_string(),
    };
    let mut lines = vec![String::new()];
    lines.extend(render_banner(&format!("MIGRATION FAILED ({status})")));
    lines.extend([
        "Review the output above for the cause.".to_string(),
        format!(
            "To restore the previous layout, copy the files back from {}/",
            config.backup_dir
        ),
        format!("  or run: {} scripts/restore_backup.py", config.interpreter),
    ]);
    render_block(&lines)
}

pub fn installing_test_runner(runner: &str, install: &str) -> String {
    format!("{runner} not found, installing with: {install}\n")
}

pub fn test_summary(result: TestRunResult) -> String {
    match result {
        TestRunResult::Skipped => "Tests skipped.\n".to_string(),
        TestRunResult::Unavailable => {
            "warning: test runner unavailable, tests were not run\n".to_string()
        }
        TestRunResult::Passed => "Tests passed.\n".to_string(),
        TestRunResult::Failed { code: Some(code) } => {
            format!("warning: tests failed (exit code {code}); the migration itself succeeded\n")
        }
        TestRunResult::Failed { code: None } => {
            "warning: test run was terminated; the migration itself succeeded\n".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_report_names_commands_modes_backups_and_docs() {
        let report = success_report(&MigratorConfig::default());
        assert!(report.contains("MIGRATION COMPLETED SUCCESSFULLY"));
        assert!(report.contains("python3 main.py --validate"));
        assert!(report.contains("pip install -r requirements.txt"));
        assert!(report.contains("python3 main.py --mode hybrid"));
        for mode in ["hybrid", "new", "legacy"] {
            assert!(report.contains(mode), "missing mode {mode}");
        }
        assert!(report.contains("backup_before_migration/"));
        assert!(report.contains("README_NEW.md"));
    }

    #[test]
    fn failure_report_points_at_backup() {
        let report = failure_report(&MigratorConfig::default(), Some(2));
        assert!(report.contains("MIGRATION FAILED (exit code 2)"));
        assert!(report.contains("Review the output above"));
        assert!(report.contains("backup_before_migration/"));
    }

    #[test]
    fn failure_report_without_code() {
        let report = failure_report(&MigratorConfig::default(), None);
        assert!(report.contains("terminated without an exit code"));
    }

    #[test]
    fn summary_uses_configured_paths() {
        let mut config = MigratorConfig::default();
        config.backup_dir = "bk".to_string();
        config.delegate = "patch.sh".to_string();
        let summary = confirmation_summary(&config);
        assert!(summary.contains("patch.sh"));
        assert!(summary.contains("bk/"));
        assert!(summary.contains("main_old.py"));
    }
}

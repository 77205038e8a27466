//! One pure function per phase of the migration gate.

use std::path::{Path, PathBuf};

use super::types::{
    ConfirmationResult, DelegatePresence, DelegateResult, EnvironmentResult, PreconditionResult,
    TestRunResult,
};

/// Resolve the interpreter with `lookup` (usually a `PATH` search).
pub fn check_environment<F>(interpreter: &str, lookup: F) -> EnvironmentResult
where
    F: Fn(&str) -> Option<PathBuf>,
{
    match lookup(interpreter) {
        Some(path) => EnvironmentResult::Found(path),
        None => EnvironmentResult::Missing {
            interpreter: interpreter.to_string(),
        },
    }
}

/// Check `root` for marker files. One present marker is enough.
pub fn check_preconditions<F>(root: &Path, markers: &[String], exists: F) -> PreconditionResult
where
    F: Fn(&Path) -> bool,
{
    let found: Vec<String> = markers
        .iter()
        .filter(|marker| exists(&root.join(marker.as_str())))
        .cloned()
        .collect();
    if found.is_empty() {
        PreconditionResult::NoMarkers {
            expected: markers.to_vec(),
        }
    } else {
        PreconditionResult::Satisfied { found }
    }
}

/// Interpret one line of operator input. Default is no.
pub fn parse_answer(line: &str) -> ConfirmationResult {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => ConfirmationResult::Accepted,
        _ => ConfirmationResult::Declined,
    }
}

pub fn check_delegate<F>(path: PathBuf, exists: F) -> DelegatePresence
where
    F: Fn(&Path) -> bool,
{
    if exists(&path) {
        DelegatePresence::Present(path)
    } else {
        DelegatePresence::Missing(path)
    }
}

/// Map the patch script's exit code. Only an explicit zero is success.
pub fn classify_exit(code: Option<i32>) -> DelegateResult {
    match code {
        Some(0) => DelegateResult::Succeeded,
        code => DelegateResult::Failed { code },
    }
}

pub fn classify_test_exit(code: Option<i32>) -> TestRunResult {
    match code {
        Some(0) => TestRunResult::Passed,
        code => TestRunResult::Failed { code },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        ["bot.py", "hybrid_bot.py", "config.py"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn preconditions_pass_with_single_marker() {
        let root = Path::new("/project");
        let result = check_preconditions(root, &markers(), |p| {
            p == root.join("config.py").as_path()
        });
        assert_eq!(
            result,
            PreconditionResult::Satisfied {
                found: vec!["config.py".to_string()]
            }
        );
    }

    #[test]
    fn preconditions_fail_without_markers() {
        let result = check_preconditions(Path::new("/project"), &markers(), |_| false);
        assert_eq!(
            result,
            PreconditionResult::NoMarkers {
                expected: markers()
            }
        );
    }

    #[test]
    fn answers_default_to_no() {
        assert_eq!(parse_answer("y\n"), ConfirmationResult::Accepted);
        assert_eq!(parse_answer("  YES "), ConfirmationResult::Accepted);
        assert_eq!(parse_answer("Y"), ConfirmationResult::Accepted);
        assert_eq!(parse_answer(""), ConfirmationResult::Declined);
        assert_eq!(parse_answer("\n"), ConfirmationResult::Declined);
        assert_eq!(parse_answer("n"), ConfirmationResult::Declined);
        assert_eq!(parse_answer("yep"), ConfirmationResult::Declined);
    }

    #[test]
    fn missing_interpreter_is_reported_by_name() {
        let result = check_environment("python3", |_| None);
        assert_eq!(
            result,
            EnvironmentResult::Missing {
                interpreter: "python3".to_string()
            }
        );
        let found = check_environment("python3", |_| Some(PathBuf::from("/usr/bin/python3")));
        assert_eq!(found, EnvironmentResult::Found(PathBuf::from("/usr/bin/python3")));
    }

    #[test]
    fn delegate_presence_follows_exists() {
        let path = PathBuf::from("/project/migration_patch.py");
        assert_eq!(
            check_delegate(path.clone(), |_| true),
            DelegatePresence::Present(path.clone())
        );
        assert_eq!(
            check_delegate(path.clone(), |_| false),
            DelegatePresence::Missing(path)
        );
    }

    #[test]
    fn only_zero_exit_is_success() {
        assert_eq!(classify_exit(Some(0)), DelegateResult::Succeeded);
        assert_eq!(
            classify_exit(Some(2)),
            DelegateResult::Failed { code: Some(2) }
        );
        assert_eq!(classify_exit(None), DelegateResult::Failed { code: None });
        assert_eq!(classify_test_exit(Some(0)), TestRunResult::Passed);
        assert_eq!(
            classify_test_exit(Some(5)),
            TestRunResult::Failed { code: Some(5) }
        );
    }
}

// runner.rs — VerificationRunner: run the test command, log failures.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::VerifyError;
use crate::remediation;

pub const DEFAULT_TEST_COMMAND: &str = "npm test";

const DEFAULT_SPECIFICATION_TAG: &str = "TRP1-Week1-AI-Native-IDE";

/// What was just mutated, for the remediation note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub intent_id: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    /// Combined stdout and stderr, capped at 4000 characters.
    pub output: String,
}

/// Runs a shell test command in the workspace root.
#[derive(Debug, Clone)]
pub struct VerificationRunner {
    workspace_root: PathBuf,
    command: String,
    log_path: PathBuf,
    specification_tag: String,
}

impl VerificationRunner {
    /// Runner for `workspace_root` writing failures to `log_path`
    /// (resolved against the root when relative).
    pub fn new(workspace_root: impl AsRef<Path>, log_path: impl AsRef<Path>) -> Self {
        let workspace_root = workspace_root.as_ref().to_path_buf();
        let log_path = workspace_root.join(log_path);
        Self {
            workspace_root,
            command: DEFAULT_TEST_COMMAND.to_string(),
            log_path,
            specification_tag: DEFAULT_SPECIFICATION_TAG.to_string(),
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_specification_tag(mut self, tag: impl Into<String>) -> Self {
        self.specification_tag = tag.into();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Run the test command; on failure append a remediation note.
    ///
    /// Only a failure to write the log is an error. A test command that
    /// cannot be spawned is reported as a failed run.
    pub fn verify(&self, request: &VerifyRequest) -> Result<VerificationResult, VerifyError> {
        let result = self.run_tests();
        if result.passed {
            tracing::info!(intent_id = %request.intent_id, path = %request.path, "verification passed");
            return Ok(result);
        }

        tracing::warn!(
            intent_id = %request.intent_id,
            path = %request.path,
            command = %self.command,
            "verification failed"
        );
        let entry = remediation::format_log_entry(
            &Utc::now(),
            &request.intent_id,
            &request.path,
            &self.specification_tag,
            &result.output,
        );
        remediation::append_entry(&self.log_path, &entry)?;
        Ok(result)
    }

    /// Run the command to completion without touching the log.
    pub fn run_tests(&self) -> VerificationResult {
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .current_dir(&self.workspace_root)
            .output();

        match output {
            Ok(out) => {
                let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
                combined.push_str(&String::from_utf8_lossy(&out.stderr));
                VerificationResult {
                    passed: out.status.success(),
                    output: remediation::truncate_output(&combined),
                }
            }
            Err(e) => VerificationResult {
                passed: false,
                output: remediation::truncate_output(&e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LOG: &str = ".orchestration/CLAUDE.md";

    fn request() -> VerifyRequest {
        VerifyRequest {
            intent_id: "INT-001".to_string(),
            path: "src/a.ts".to_string(),
        }
    }

    #[test]
    fn passing_command_writes_no_log() {
        let dir = tempdir().unwrap();
        let runner = VerificationRunner::new(dir.path(), LOG).with_command("echo all good");

        let result = runner.verify(&request()).unwrap();
        assert!(result.passed);
        assert_eq!(result.output, "all good\n");
        assert!(!runner.log_path().exists());
    }

    #[test]
    fn failing_command_creates_log_section() {
        let dir = tempdir().unwrap();
        let runner = VerificationRunner::new(dir.path(), LOG)
            .with_command("echo 'expected 1 got 2' >&2; exit 1");

        let result = runner.verify(&request()).unwrap();
        assert!(!result.passed);
        assert!(result.output.contains("expected 1 got 2"));

        let log = fs::read_to_string(dir.path().join(LOG)).unwrap();
        assert!(log.starts_with("## "));
        assert!(log.contains("- Intent: INT-001\n- File: src/a.ts\n"));
        assert!(log.contains("- Specification: TRP1-Week1-AI-Native-IDE\n"));
        assert!(log.contains("```\nexpected 1 got 2\n```"));
        assert!(log.ends_with("---\n"));
    }

    #[test]
    fn failures_append_sections() {
        let dir = tempdir().unwrap();
        let runner = VerificationRunner::new(dir.path(), LOG).with_command("false");
        runner.verify(&request()).unwrap();
        runner.verify(&request()).unwrap();

        let log = fs::read_to_string(dir.path().join(LOG)).unwrap();
        assert_eq!(log.matches("- Intent: INT-001").count(), 2);
    }

    #[test]
    fn timeout_output_adds_targeted_test_bullet() {
        let dir = tempdir().unwrap();
        let runner = VerificationRunner::new(dir.path(), LOG)
            .with_command("echo 'Timeout of 5000ms exceeded'; exit 2");
        runner.verify(&request()).unwrap();

        let log = fs::read_to_string(dir.path().join(LOG)).unwrap();
        assert!(log.contains("- Consider running targeted tests to avoid hitting timeouts."));
    }

    #[test]
    fn runs_in_workspace_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let runner = VerificationRunner::new(dir.path(), LOG).with_command("cat marker.txt");
        assert_eq!(runner.run_tests().output, "here");
    }

    #[test]
    fn long_output_is_truncated() {
        let dir = tempdir().unwrap();
        let runner = VerificationRunner::new(dir.path(), LOG)
            .with_command("head -c 5000 /dev/zero | tr '\\0' 'x'");
        let result = runner.run_tests();
        assert!(result.passed);
        assert!(result.output.ends_with("\n...<truncated>"));
    }

    #[test]
    fn missing_workspace_is_a_failed_run() {
        let dir = tempdir().unwrap();
        let runner = VerificationRunner::new(dir.path().join("gone"), "log.md").with_command("true");
        let result = runner.run_tests();
        assert!(!result.passed);
        assert!(!result.output.is_empty());
    }

    #[test]
    fn result_serializes_as_passed_and_output() {
        let json = serde_json::to_value(VerificationResult {
            passed: false,
            output: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"passed": false, "output": "x"}));
    }
}

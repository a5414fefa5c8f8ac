// config.rs — Gate configuration.
//
// All gate state lives under `.orchestration/` in the project root: the
// intents file maintained by the planner, the trace ledger, the
// verification log and an optional `gate.toml`:
//
//   [trace]
//   specification_tag = "TRP1-Week1-AI-Native-IDE"
//   model_identifier = "openai-api"
//   entity_type = "AI"
//
//   [verification]
//   command = "cargo test"
//
//   [shell]
//   extra_danger_patterns = ['(^|\s)mv\s', 'sudo\s+rm']

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ig_audit::TraceSettings;
use ig_verify::{VerificationRunner, DEFAULT_TEST_COMMAND};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

pub const ORCHESTRATION_DIR: &str = ".orchestration";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSettings {
    /// Shell command run through `sh -c` in the workspace root.
    pub command: String,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_TEST_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// Case-insensitive regexes added to the built-in danger list.
    pub extra_danger_patterns: Vec<String>,
}

/// Contents of `gate.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    pub trace: TraceSettings,
    pub verification: VerificationSettings,
    pub shell: ShellSettings,
}

/// Where the gate reads and writes its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Project root; tool paths are relative to it.
    pub workspace_root: PathBuf,

    pub intents_file: PathBuf,

    /// Append-only JSONL trace ledger.
    pub trace_ledger: PathBuf,

    /// Markdown log of failed verification runs.
    pub verification_log: PathBuf,

    pub settings_file: PathBuf,

    #[serde(default)]
    pub settings: GateSettings,
}

impl GatewayConfig {
    /// Standard `.orchestration/` layout with default settings.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let orch = root.join(ORCHESTRATION_DIR);
        Self {
            workspace_root: root,
            intents_file: orch.join("active_intents.yaml"),
            trace_ledger: orch.join("agent_trace.jsonl"),
            verification_log: orch.join("CLAUDE.md"),
            settings_file: orch.join("gate.toml"),
            settings: GateSettings::default(),
        }
    }

    /// Standard layout plus `gate.toml` when present.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let mut config = Self::for_project(project_root);
        config.settings = read_settings(&config.settings_file)?;
        Ok(config)
    }

    pub fn verification_runner(&self) -> VerificationRunner {
        VerificationRunner::new(&self.workspace_root, &self.verification_log)
            .with_command(&self.settings.verification.command)
            .with_specification_tag(&self.settings.trace.specification_tag)
    }
}

fn read_settings(path: &Path) -> Result<GateSettings, GatewayError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no gate settings; using defaults");
            return Ok(GateSettings::default());
        }
        Err(source) => {
            return Err(GatewayError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&raw).map_err(|e| GatewayError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn for_project_uses_orchestration_layout() {
        let config = GatewayConfig::for_project("/work");
        assert_eq!(
            config.intents_file,
            PathBuf::from("/work/.orchestration/active_intents.yaml")
        );
        assert_eq!(
            config.trace_ledger,
            PathBuf::from("/work/.orchestration/agent_trace.jsonl")
        );
        assert_eq!(
            config.verification_log,
            PathBuf::from("/work/.orchestration/CLAUDE.md")
        );
        assert_eq!(config.settings.verification.command, "npm test");
        assert_eq!(
            config.settings.trace.specification_tag,
            "TRP1-Week1-AI-Native-IDE"
        );
    }

    #[test]
    fn load_without_settings_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = GatewayConfig::load(dir.path()).unwrap();
        assert_eq!(config.settings, GateSettings::default());
    }

    #[test]
    fn load_reads_partial_settings() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(ORCHESTRATION_DIR)).unwrap();
        fs::write(
            dir.path().join(".orchestration/gate.toml"),
            r#"
[trace]
model_identifier = "local-llm"

[verification]
command = "cargo test"

[shell]
extra_danger_patterns = ['sudo\s+rm']
"#,
        )
        .unwrap();

        let config = GatewayConfig::load(dir.path()).unwrap();
        assert_eq!(config.settings.trace.model_identifier, "local-llm");
        assert_eq!(config.settings.trace.entity_type, "AI");
        assert_eq!(config.settings.verification.command, "cargo test");
        assert_eq!(config.settings.shell.extra_danger_patterns, vec![r"sudo\s+rm"]);
        assert_eq!(config.verification_runner().command(), "cargo test");
    }

    #[test]
    fn malformed_settings_are_an_error() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(ORCHESTRATION_DIR)).unwrap();
        fs::write(dir.path().join(".orchestration/gate.toml"), "[trace\n").unwrap();

        assert!(matches!(
            GatewayConfig::load(dir.path()),
            Err(GatewayError::ConfigInvalid { .. })
        ));
    }
}

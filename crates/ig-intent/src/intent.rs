// intent.rs — Intent: a declared, scoped unit of authorized work.
//
// The intents file is a YAML document:
//
//   active_intents:
//     - id: INT-001
//       name: Build the weather API
//       status: IN_PROGRESS
//       owned_scope: ["src/api/**"]
//       constraints: ["No new dependencies"]
//       acceptance_criteria: ["All tests pass"]
//
// `constraints` and `acceptance_criteria` are surfaced to the agent only;
// nothing here enforces them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Planning status of an intent. Informational; selection does not
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentStatus {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentStatus::Todo => write!(f, "TODO"),
            IntentStatus::InProgress => write!(f, "IN_PROGRESS"),
            IntentStatus::Done => write!(f, "DONE"),
        }
    }
}

/// A single intent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Stable identifier (e.g., "INT-001").
    pub id: String,

    /// Human-readable label.
    pub name: String,

    pub status: IntentStatus,

    /// Glob patterns for the paths this intent may modify.
    #[serde(default)]
    pub owned_scope: Vec<String>,

    #[serde(default)]
    pub constraints: Vec<String>,

    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

impl Intent {
    /// True iff `path` matches at least one `owned_scope` pattern.
    pub fn in_scope(&self, path: &str) -> bool {
        ig_policy::path_in_scope(&self.owned_scope, path)
    }

    /// One-line description used in approval prompts.
    pub fn scope_summary(&self) -> String {
        format!(
            "Intent {} ({}) scoped to {}",
            self.id,
            self.name,
            self.owned_scope.join(", ")
        )
    }
}

/// Root of the intents document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentState {
    #[serde(default)]
    pub active_intents: Vec<Intent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(scope: &[&str]) -> Intent {
        Intent {
            id: "INT-001".to_string(),
            name: "Weather API".to_string(),
            status: IntentStatus::InProgress,
            owned_scope: scope.iter().map(|s| s.to_string()).collect(),
            constraints: vec![],
            acceptance_criteria: vec![],
        }
    }

    #[test]
    fn in_scope_uses_owned_scope_globs() {
        let i = intent(&["src/**"]);
        assert!(i.in_scope("src/a.ts"));
        assert!(!i.in_scope("docs/readme.md"));
    }

    #[test]
    fn empty_scope_authorizes_nothing() {
        assert!(!intent(&[]).in_scope("src/a.ts"));
    }

    #[test]
    fn scope_summary_lists_patterns() {
        let summary = intent(&["src/**", "tests/**"]).scope_summary();
        assert_eq!(
            summary,
            "Intent INT-001 (Weather API) scoped to src/**, tests/**"
        );
    }

    #[test]
    fn status_uses_screaming_case() {
        let yaml = "id: X\nname: x\nstatus: IN_PROGRESS\n";
        let parsed: Intent = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.status, IntentStatus::InProgress);
        assert!(parsed.owned_scope.is_empty());
        assert_eq!(parsed.status.to_string(), "IN_PROGRESS");
    }
}

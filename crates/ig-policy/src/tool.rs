// tool.rs — Tool invocation model and per-kind argument extraction.
//
// Agents send tool calls as a name plus a loosely shaped JSON argument bag,
// with several aliases for the same logical field (`path` vs `file_path`).
// `ToolCall::from_invocation` resolves the kind and pulls the canonical
// fields out exactly once; every later checkpoint works on the typed
// variant instead of re-reading the raw map.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PolicyError;

/// Read-only and advisory tools. Never gated.
pub const READ_ONLY_TOOLS: &[&str] = &[
    "read_file",
    "list_files",
    "read_command_output",
    "codebase_search",
    "search_files",
    "ask_followup_question",
    "skill",
    "attempt_completion",
    "new_task",
    "switch_mode",
    "update_todo_list",
    "run_slash_command",
    "generate_image",
];

/// Tools that mutate workspace state. `execute_command` is re-classified
/// by inspecting its command string.
pub const MUTATING_TOOLS: &[&str] = &[
    "write_to_file",
    "write_file",
    "apply_diff",
    "apply_edit",
    "apply_patch",
    "edit_file",
    "search_replace",
    "search_and_replace",
    "edit",
    "execute_command",
];

/// The intent-selection declaration tool.
pub const SELECT_ACTIVE_INTENT: &str = "select_active_intent";

/// One tool call attempt as received from the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool identifier (e.g., "write_to_file").
    pub name: String,

    /// Structured key → value argument bag.
    #[serde(default)]
    pub arguments: Map<String, Value>,

    /// True while the call is still being streamed. Partial calls are
    /// never evaluated.
    #[serde(default, rename = "partial")]
    pub is_partial: bool,
}

impl ToolInvocation {
    /// Create a complete invocation with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
            is_partial: false,
        }
    }

    /// Add an argument and return self (builder pattern).
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Mark the invocation as still streaming.
    pub fn partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    /// A string argument, treating non-strings and empty strings as absent.
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.arguments
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The first present alias among `keys`.
    fn first_arg(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.arg_str(key))
            .map(str::to_string)
    }

    fn target_path(&self) -> Option<String> {
        self.first_arg(&["path", "file_path"])
    }
}

/// Which family a tool name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ReadFile,
    WriteToFile,
    SelectActiveIntent,
    ExecuteCommand,
    /// Patch/diff/replace applicators and other file writers.
    FileMutation,
    /// Read-only and advisory tools other than `read_file`.
    ReadOnly,
    /// Anything not named in either list.
    Unrecognized,
}

impl ToolKind {
    /// Resolve a tool name to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "read_file" => ToolKind::ReadFile,
            "write_to_file" => ToolKind::WriteToFile,
            "execute_command" => ToolKind::ExecuteCommand,
            SELECT_ACTIVE_INTENT => ToolKind::SelectActiveIntent,
            n if MUTATING_TOOLS.contains(&n) => ToolKind::FileMutation,
            n if READ_ONLY_TOOLS.contains(&n) => ToolKind::ReadOnly,
            _ => ToolKind::Unrecognized,
        }
    }
}

/// A tool invocation with its canonical arguments extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    ReadFile {
        path: Option<String>,
    },
    WriteToFile {
        path: Option<String>,
        content: Option<String>,
        intent_id: Option<String>,
        mutation_class: Option<String>,
    },
    SelectActiveIntent {
        /// Trimmed; `None` when missing or blank.
        intent_id: Option<String>,
    },
    ExecuteCommand {
        command: Option<String>,
        path: Option<String>,
    },
    FileMutation {
        tool: String,
        path: Option<String>,
    },
    ReadOnly {
        tool: String,
    },
    Unrecognized {
        tool: String,
    },
}

impl ToolCall {
    /// Extract the canonical fields for the invocation's tool kind.
    pub fn from_invocation(invocation: &ToolInvocation) -> Self {
        match ToolKind::from_name(&invocation.name) {
            ToolKind::ReadFile => ToolCall::ReadFile {
                path: invocation.target_path(),
            },
            ToolKind::WriteToFile => ToolCall::WriteToFile {
                path: invocation.target_path(),
                content: invocation.first_arg(&["content"]),
                intent_id: invocation.first_arg(&["intent_id"]),
                mutation_class: invocation.first_arg(&["mutation_class"]),
            },
            ToolKind::SelectActiveIntent => ToolCall::SelectActiveIntent {
                intent_id: invocation
                    .arg_str("intent_id")
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
            },
            ToolKind::ExecuteCommand => ToolCall::ExecuteCommand {
                command: invocation.first_arg(&["command"]),
                path: invocation.target_path(),
            },
            ToolKind::FileMutation => ToolCall::FileMutation {
                tool: invocation.name.clone(),
                path: invocation.target_path(),
            },
            ToolKind::ReadOnly => ToolCall::ReadOnly {
                tool: invocation.name.clone(),
            },
            ToolKind::Unrecognized => ToolCall::Unrecognized {
                tool: invocation.name.clone(),
            },
        }
    }

    /// The workspace-relative path this call targets, if it carries one.
    pub fn target_path(&self) -> Option<&str> {
        match self {
            ToolCall::ReadFile { path }
            | ToolCall::WriteToFile { path, .. }
            | ToolCall::ExecuteCommand { path, .. }
            | ToolCall::FileMutation { path, .. } => path.as_deref(),
            ToolCall::SelectActiveIntent { .. }
            | ToolCall::ReadOnly { .. }
            | ToolCall::Unrecognized { .. } => None,
        }
    }
}

/// Closed category tag required on every `write_to_file` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationClass {
    AstRefactor,
    IntentEvolution,
    DocUpdate,
}

impl MutationClass {
    pub const ALL: [MutationClass; 3] = [
        MutationClass::AstRefactor,
        MutationClass::IntentEvolution,
        MutationClass::DocUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MutationClass::AstRefactor => "AST_REFACTOR",
            MutationClass::IntentEvolution => "INTENT_EVOLUTION",
            MutationClass::DocUpdate => "DOC_UPDATE",
        }
    }
}

impl fmt::Display for MutationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutationClass {
    type Err = PolicyError;

    /// Exact, case-sensitive match against the three tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MutationClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownMutationClass(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_resolution() {
        assert_eq!(ToolKind::from_name("read_file"), ToolKind::ReadFile);
        assert_eq!(ToolKind::from_name("write_to_file"), ToolKind::WriteToFile);
        assert_eq!(ToolKind::from_name("apply_diff"), ToolKind::FileMutation);
        assert_eq!(ToolKind::from_name("search_files"), ToolKind::ReadOnly);
        assert_eq!(
            ToolKind::from_name("select_active_intent"),
            ToolKind::SelectActiveIntent
        );
        assert_eq!(ToolKind::from_name("browser_action"), ToolKind::Unrecognized);
    }

    #[test]
    fn path_falls_back_to_file_path_alias() {
        let inv = ToolInvocation::new("apply_diff").with_arg("file_path", "src/lib.rs");
        let call = ToolCall::from_invocation(&inv);
        assert_eq!(call.target_path(), Some("src/lib.rs"));

        let inv = ToolInvocation::new("apply_diff")
            .with_arg("path", "src/a.rs")
            .with_arg("file_path", "src/b.rs");
        assert_eq!(
            ToolCall::from_invocation(&inv).target_path(),
            Some("src/a.rs")
        );
    }

    #[test]
    fn empty_and_non_string_arguments_are_absent() {
        let inv = ToolInvocation::new("write_to_file")
            .with_arg("path", "")
            .with_arg("content", json!(42));
        match ToolCall::from_invocation(&inv) {
            ToolCall::WriteToFile { path, content, .. } => {
                assert!(path.is_none());
                assert!(content.is_none());
            }
            other => panic!("expected WriteToFile, got {:?}", other),
        }
    }

    #[test]
    fn selection_intent_id_is_trimmed() {
        let inv = ToolInvocation::new("select_active_intent").with_arg("intent_id", "  INT-001 ");
        assert_eq!(
            ToolCall::from_invocation(&inv),
            ToolCall::SelectActiveIntent {
                intent_id: Some("INT-001".to_string())
            }
        );

        let blank = ToolInvocation::new("select_active_intent").with_arg("intent_id", "   ");
        assert_eq!(
            ToolCall::from_invocation(&blank),
            ToolCall::SelectActiveIntent { intent_id: None }
        );
    }

    #[test]
    fn mutation_class_parsing_is_exact() {
        assert_eq!(
            "AST_REFACTOR".parse::<MutationClass>().unwrap(),
            MutationClass::AstRefactor
        );
        assert_eq!(
            "DOC_UPDATE".parse::<MutationClass>().unwrap(),
            MutationClass::DocUpdate
        );
        assert!("doc_update".parse::<MutationClass>().is_err());
        assert!("BOGUS".parse::<MutationClass>().is_err());
    }

    #[test]
    fn invocation_deserializes_from_runtime_json() {
        let inv: ToolInvocation = serde_json::from_value(json!({
            "name": "write_to_file",
            "arguments": {"path": "src/a.ts", "content": "x"},
            "partial": true
        }))
        .unwrap();
        assert!(inv.is_partial);
        assert_eq!(inv.arg_str("path"), Some("src/a.ts"));

        let minimal: ToolInvocation = serde_json::from_value(json!({"name": "ls"})).unwrap();
        assert!(!minimal.is_partial);
        assert!(minimal.arguments.is_empty());
    }
}

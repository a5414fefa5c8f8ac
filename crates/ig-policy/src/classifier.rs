// classifier.rs — Tool call risk classification.
//
// Pure function of the tool call: no I/O, no state. The dispatch is an
// exhaustive match over `ToolCall`, so adding a tool kind forces a
// classification decision here.
//
//   read-only / advisory tools  → Safe
//   file writers and patchers   → Destructive
//   execute_command             → Destructive if the command matches a
//                                 danger pattern, otherwise Unknown
//   select_active_intent        → Unknown (a declaration, never executed)
//   anything else               → Unknown
//
// Unknown is treated like Safe downstream; only names and
// patterns known to be risky require approval.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::tool::{ToolCall, ToolInvocation};

/// Shell fragments that mark a command as destructive. Matched
/// case-insensitively, anchored at the start of the command or after
/// whitespace.
pub const BUILTIN_DANGER_PATTERNS: &[&str] = &[
    r"(^|\s)rm\s",
    r"(^|\s)rimraf\b",
    r"(^|\s)rmdir\b",
    r"(^|\s)del\b",
    r"(^|\s)truncate\b",
    r"(^|\s)drop\s+database",
    r"(^|\s)drop\s+table",
    r"(^|\s)git\s+reset\s+--hard",
    r"(^|\s)git\s+clean\s+-",
];

/// Risk class of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Safe,
    Destructive,
    Unknown,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Safe => write!(f, "SAFE"),
            Classification::Destructive => write!(f, "DESTRUCTIVE"),
            Classification::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classifies tool calls against the fixed tool lists and a set of shell
/// danger patterns.
#[derive(Debug, Clone)]
pub struct Classifier {
    danger_patterns: Vec<Regex>,
}

impl Classifier {
    /// A classifier with only the built-in danger patterns.
    pub fn new() -> Self {
        Self {
            danger_patterns: BUILTIN_DANGER_PATTERNS
                .iter()
                .filter_map(|p| compile(p).ok())
                .collect(),
        }
    }

    /// A classifier with the built-in patterns plus `extra` ones from
    /// configuration. Fails on the first invalid extra pattern.
    pub fn with_extra_patterns(extra: &[String]) -> Result<Self, PolicyError> {
        let mut classifier = Self::new();
        for pattern in extra {
            let regex = compile(pattern).map_err(|e| PolicyError::InvalidDangerPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            classifier.danger_patterns.push(regex);
        }
        Ok(classifier)
    }

    /// Number of active danger patterns.
    pub fn pattern_count(&self) -> usize {
        self.danger_patterns.len()
    }

    /// Classify an already-extracted tool call.
    pub fn classify(&self, call: &ToolCall) -> Classification {
        let class = match call {
            ToolCall::ReadFile { .. } | ToolCall::ReadOnly { .. } => Classification::Safe,
            ToolCall::WriteToFile { .. } | ToolCall::FileMutation { .. } => {
                Classification::Destructive
            }
            ToolCall::ExecuteCommand { command, .. } => match command.as_deref() {
                Some(cmd) if self.is_dangerous_command(cmd) => Classification::Destructive,
                _ => Classification::Unknown,
            },
            ToolCall::SelectActiveIntent { .. } => Classification::Unknown,
            // Explicit default: unlisted tools are not gated.
            ToolCall::Unrecognized { .. } => Classification::Unknown,
        };
        tracing::debug!(?call, %class, "classified tool call");
        class
    }

    /// Classify a raw invocation.
    pub fn classify_invocation(&self, invocation: &ToolInvocation) -> Classification {
        self.classify(&ToolCall::from_invocation(invocation))
    }

    /// Whether a shell command matches any danger pattern.
    pub fn is_dangerous_command(&self, command: &str) -> bool {
        self.danger_patterns.iter().any(|p| p.is_match(command))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

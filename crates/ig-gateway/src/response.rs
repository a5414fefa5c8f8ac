// response.rs — What the gate hands back for one tool call.

use std::fmt;

use ig_audit::TraceRecord;
use serde::{Deserialize, Serialize};

/// Why a call was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    StaleFile,
    MissingIntentId,
    InvalidIntentId,
    MissingActiveIntent,
    StaleActiveIntent,
    ScopeViolation,
    IntentMismatch,
    InvalidMutationClass,
    ApprovalDenied,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::StaleFile => "stale_file",
            RejectionKind::MissingIntentId => "missing_intent_id",
            RejectionKind::InvalidIntentId => "invalid_intent_id",
            RejectionKind::MissingActiveIntent => "missing_active_intent",
            RejectionKind::StaleActiveIntent => "stale_active_intent",
            RejectionKind::ScopeViolation => "scope_violation",
            RejectionKind::IntentMismatch => "intent_mismatch",
            RejectionKind::InvalidMutationClass => "invalid_mutation_class",
            RejectionKind::ApprovalDenied => "approval_denied",
        }
    }

    /// Whether this rejection increments the session's mistake counter.
    /// A human veto is not the agent's mistake.
    pub fn counts_as_mistake(&self) -> bool {
        !matches!(self, RejectionKind::ApprovalDenied)
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error payload returned to the agent:
/// `{"type": "tool_error", "tool": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "tool_error")]
pub struct ToolError {
    pub tool: String,
    pub message: String,
}

impl ToolError {
    pub fn to_json(&self) -> String {
        // Two string fields; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub error: ToolError,
}

impl Rejection {
    pub fn new(kind: RejectionKind, tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            error: ToolError {
                tool: tool.into(),
                message: message.into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }
}

/// Result of running one invocation through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// The invocation was still streaming; nothing was checked or run.
    Skipped,

    /// `select_active_intent` succeeded. `context` is the intent-context
    /// document to return to the agent in place of a tool result.
    IntentSelected { intent_id: String, context: String },

    Rejected(Rejection),

    /// The executor ran the tool. `record` is set when a trace record
    /// was appended for it.
    Executed {
        output: String,
        record: Option<TraceRecord>,
    },
}

impl GateOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, GateOutcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            GateOutcome::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_error_payload_shape() {
        let rejection = Rejection::new(RejectionKind::ScopeViolation, "write_to_file", "nope");
        let json: serde_json::Value = serde_json::from_str(&rejection.error.to_json()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "tool_error", "tool": "write_to_file", "message": "nope"})
        );
    }

    #[test]
    fn only_a_veto_is_not_a_mistake() {
        assert!(!RejectionKind::ApprovalDenied.counts_as_mistake());
        assert!(RejectionKind::StaleFile.counts_as_mistake());
        assert!(RejectionKind::ScopeViolation.counts_as_mistake());
    }

    #[test]
    fn kind_codes_are_snake_case() {
        assert_eq!(
            serde_json::to_value(RejectionKind::InvalidMutationClass).unwrap(),
            "invalid_mutation_class"
        );
        assert_eq!(RejectionKind::MissingActiveIntent.to_string(), "missing_active_intent");
    }
}

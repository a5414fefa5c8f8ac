// gate.rs — The per-call governance pipeline.
//
// Every complete tool invocation passes through `Gate::run_tool` exactly
// once, in this order:
//
//   1. read_file        → record a read baseline (never blocks)
//   2. write_to_file    → reject if the target changed since it was read
//   3. select_active_intent → validate and select; never forwarded
//   4. classify
//   5. DESTRUCTIVE      → mutation guard, then human approval
//   6. execute via the ToolExecutor
//   7. write_to_file with full metadata → append a trace record
//
// Any rejection short-circuits the remaining steps.
//
// The staleness check runs before classification, so a stale write is
// reported as stale even when no intent is selected. The agent learns it
// must re-read before it spends a turn selecting an intent.
//
// The session mutex is held from step 1 to the end. Two calls from the
// same conversation can therefore never interleave between the staleness
// check and the write, while other sessions run in parallel.

use std::str::FromStr;
use std::sync::Arc;

use ig_audit::{TraceLedger, WriteTrace};
use ig_intent::{intent_context_xml, IntentStore};
use ig_policy::{Classification, Classifier, MutationClass, ToolCall, ToolInvocation};

use crate::approval::ApprovalChannel;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::executor::ToolExecutor;
use crate::response::{GateOutcome, Rejection, RejectionKind};
use crate::session::{SessionHandle, SessionState};

const STALE_FILE_MESSAGE: &str = "Stale File: The file has changed since you last read it. Please re-read the file and re-plan your changes.";
const INVALID_INTENT_MESSAGE: &str = "You must cite a valid active Intent ID.";
const NO_ACTIVE_INTENT_MESSAGE: &str =
    "No active intent selected. You must call select_active_intent(intent_id) first.";
const STALE_ACTIVE_INTENT_MESSAGE: &str =
    "Active intent not found in active_intents.yaml. Please choose a valid intent.";
const INVALID_MUTATION_CLASS_MESSAGE: &str =
    "Invalid mutation_class. Must be AST_REFACTOR, INTENT_EVOLUTION, or DOC_UPDATE.";
const APPROVAL_DENIED_MESSAGE: &str =
    "Destructive operation rejected by human reviewer. Please propose a safer alternative.";

/// Orchestrates classification, the mutation guard, approval, execution
/// and tracing around a single tool call.
pub struct Gate {
    intents: IntentStore,
    classifier: Classifier,
    ledger: Arc<TraceLedger>,
    approval: Box<dyn ApprovalChannel>,
}

impl Gate {
    pub fn new(
        intents: IntentStore,
        classifier: Classifier,
        ledger: Arc<TraceLedger>,
        approval: Box<dyn ApprovalChannel>,
    ) -> Self {
        Self {
            intents,
            classifier,
            ledger,
            approval,
        }
    }

    /// Build a gate over the project layout in `config`.
    pub fn from_config(
        config: &GatewayConfig,
        approval: Box<dyn ApprovalChannel>,
    ) -> Result<Self, GatewayError> {
        let classifier =
            Classifier::with_extra_patterns(&config.settings.shell.extra_danger_patterns)?;
        let ledger = TraceLedger::new(
            &config.workspace_root,
            &config.trace_ledger,
            config.settings.trace.clone(),
        );
        Ok(Self::new(
            IntentStore::new(&config.intents_file),
            classifier,
            Arc::new(ledger),
            approval,
        ))
    }

    pub fn intents(&self) -> &IntentStore {
        &self.intents
    }

    pub fn ledger(&self) -> &Arc<TraceLedger> {
        &self.ledger
    }

    /// Run one invocation for `session`.
    ///
    /// Rejections come back as `Ok(GateOutcome::Rejected(..))`. `Err` means a
    /// collaborator failed: the intents file, the filesystem, the ledger,
    /// the approval channel or the executor.
    pub fn run_tool(
        &self,
        session: &SessionHandle,
        invocation: &ToolInvocation,
        executor: &dyn ToolExecutor,
    ) -> Result<GateOutcome, GatewayError> {
        if invocation.is_partial {
            tracing::trace!(tool = %invocation.name, "partial invocation skipped");
            return Ok(GateOutcome::Skipped);
        }

        let mut state = session.lock()?;
        let call = ToolCall::from_invocation(invocation);
        let tool = invocation.name.as_str();

        if let ToolCall::ReadFile { path: Some(path) } = &call {
            state.locks.record_baseline(path)?;
        }

        if let ToolCall::WriteToFile {
            path: Some(path), ..
        } = &call
        {
            if state.locks.is_stale(path)? {
                return Ok(reject(
                    &mut state,
                    Rejection::new(RejectionKind::StaleFile, tool, STALE_FILE_MESSAGE),
                ));
            }
        }

        if let ToolCall::SelectActiveIntent { intent_id } = &call {
            return self.select_intent(&mut state, tool, intent_id.as_deref());
        }

        let classification = self.classifier.classify(&call);
        tracing::debug!(session = state.id(), tool, %classification, "tool classified");

        if classification == Classification::Destructive {
            if let Some(rejection) = self.guard(&mut state, tool, &call)? {
                return Ok(reject(&mut state, rejection));
            }
            let prompt = approval_prompt(tool, &state);
            if !self.approval.request_approval(&prompt)? {
                return Ok(reject(
                    &mut state,
                    Rejection::new(RejectionKind::ApprovalDenied, tool, APPROVAL_DENIED_MESSAGE),
                ));
            }
        }

        let output = executor.execute(invocation)?;
        tracing::info!(session = state.id(), tool, "tool executed");

        let mut record = None;
        if let ToolCall::WriteToFile {
            path: Some(path),
            content: Some(content),
            intent_id,
            mutation_class,
        } = &call
        {
            // Only moves a baseline the session already holds from a read.
            state.locks.record_written(path, content);
            if let (Some(intent_id), Some(mutation_class)) = (intent_id, mutation_class) {
                record = Some(self.ledger.append(&WriteTrace {
                    path,
                    content,
                    intent_id,
                    mutation_class,
                })?);
            }
        }

        Ok(GateOutcome::Executed { output, record })
    }

    fn select_intent(
        &self,
        state: &mut SessionState,
        tool: &str,
        intent_id: Option<&str>,
    ) -> Result<GateOutcome, GatewayError> {
        let Some(intent_id) = intent_id else {
            return Ok(reject(
                state,
                Rejection::new(RejectionKind::MissingIntentId, tool, INVALID_INTENT_MESSAGE),
            ));
        };
        let Some(intent) = self.intents.lookup(intent_id)? else {
            return Ok(reject(
                state,
                Rejection::new(RejectionKind::InvalidIntentId, tool, INVALID_INTENT_MESSAGE),
            ));
        };

        tracing::info!(session = state.id(), intent_id, "intent selected");
        let context = intent_context_xml(&intent);
        state.selected_intent = Some(intent);
        state.consecutive_mistake_count = 0;
        Ok(GateOutcome::IntentSelected {
            intent_id: intent_id.to_string(),
            context,
        })
    }

    /// Checks a destructive call against the session's active intent.
    /// `Ok(None)` means the call may proceed to approval.
    ///
    /// The selected intent is looked up again rather than trusted from the
    /// session: `active_intents.yaml` can change between selection and use.
    /// A revoked intent clears the selection. A surviving one replaces the
    /// session's copy, so scope edits apply to this very call and the
    /// approval prompt shows the current scope.
    fn guard(
        &self,
        state: &mut SessionState,
        tool: &str,
        call: &ToolCall,
    ) -> Result<Option<Rejection>, GatewayError> {
        let Some(selected) = state.selected_intent.as_ref() else {
            return Ok(Some(Rejection::new(
                RejectionKind::MissingActiveIntent,
                tool,
                NO_ACTIVE_INTENT_MESSAGE,
            )));
        };

        let Some(intent) = self.intents.lookup(&selected.id)? else {
            tracing::warn!(
                session = state.id(),
                intent_id = %selected.id,
                "selected intent no longer exists; selection cleared"
            );
            state.selected_intent = None;
            return Ok(Some(Rejection::new(
                RejectionKind::StaleActiveIntent,
                tool,
                STALE_ACTIVE_INTENT_MESSAGE,
            )));
        };

        if let Some(path) = call.target_path() {
            if !intent.in_scope(path) {
                let message = format!(
                    "Scope Violation: {} is not authorized to edit {}. Request scope expansion.",
                    intent.id, path
                );
                state.selected_intent = Some(intent);
                return Ok(Some(Rejection::new(
                    RejectionKind::ScopeViolation,
                    tool,
                    message,
                )));
            }
        }

        let rejection = match call {
            ToolCall::WriteToFile {
                intent_id,
                mutation_class,
                ..
            } => check_write_metadata(
                tool,
                &intent.id,
                intent_id.as_deref(),
                mutation_class.as_deref(),
            ),
            _ => None,
        };
        state.selected_intent = Some(intent);
        Ok(rejection)
    }
}

/// `write_to_file` must cite the active intent and a known mutation class.
fn check_write_metadata(
    tool: &str,
    active_id: &str,
    intent_id: Option<&str>,
    mutation_class: Option<&str>,
) -> Option<Rejection> {
    if intent_id != Some(active_id) {
        return Some(Rejection::new(
            RejectionKind::IntentMismatch,
            tool,
            format!(
                "Intent mismatch: expected {}, but received {}.",
                active_id,
                intent_id.unwrap_or("(missing)")
            ),
        ));
    }
    let valid_class = mutation_class.is_some_and(|c| MutationClass::from_str(c).is_ok());
    if !valid_class {
        return Some(Rejection::new(
            RejectionKind::InvalidMutationClass,
            tool,
            INVALID_MUTATION_CLASS_MESSAGE,
        ));
    }
    None
}

fn approval_prompt(tool: &str, state: &SessionState) -> String {
    let notice = state
        .selected_intent()
        .map(|intent| intent.scope_summary())
        .unwrap_or_else(|| "No intent context available".to_string());
    format!("Destructive tool detected: {tool}.\n{notice}\nApprove execution?")
}

/// Count the rejection against the session and hand it back.
fn reject(state: &mut SessionState, rejection: Rejection) -> GateOutcome {
    if rejection.kind.counts_as_mistake() {
        state.consecutive_mistake_count += 1;
    }
    tracing::warn!(
        session = state.id(),
        tool = %rejection.error.tool,
        kind = %rejection.kind,
        mistakes = state.consecutive_mistake_count,
        "tool call rejected"
    );
    GateOutcome::Rejected(rejection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_requires_exact_intent_id() {
        let r = check_write_metadata("write_to_file", "INT-001", Some("INT-002"), Some("DOC_UPDATE"))
            .unwrap();
        assert_eq!(r.kind, RejectionKind::IntentMismatch);
        assert_eq!(
            r.message(),
            "Intent mismatch: expected INT-001, but received INT-002."
        );

        let r = check_write_metadata("write_to_file", "INT-001", None, Some("DOC_UPDATE")).unwrap();
        assert_eq!(
            r.message(),
            "Intent mismatch: expected INT-001, but received (missing)."
        );
    }

    #[test]
    fn metadata_requires_known_mutation_class() {
        for bad in [None, Some("BOGUS"), Some("ast_refactor")] {
            let r = check_write_metadata("write_to_file", "INT-001", Some("INT-001"), bad).unwrap();
            assert_eq!(r.kind, RejectionKind::InvalidMutationClass);
        }
        for good in ["AST_REFACTOR", "INTENT_EVOLUTION", "DOC_UPDATE"] {
            assert!(check_write_metadata("write_to_file", "INT-001", Some("INT-001"), Some(good))
                .is_none());
        }
    }

    #[test]
    fn prompt_without_intent_says_so() {
        let state = SessionState::new("s", "/work");
        assert_eq!(
            approval_prompt("execute_command", &state),
            "Destructive tool detected: execute_command.\nNo intent context available\nApprove execution?"
        );
    }

    #[test]
    fn rejection_counts_except_veto() {
        let mut state = SessionState::new("s", "/work");
        reject(
            &mut state,
            Rejection::new(RejectionKind::ScopeViolation, "t", "m"),
        );
        reject(
            &mut state,
            Rejection::new(RejectionKind::ApprovalDenied, "t", "m"),
        );
        assert_eq!(state.consecutive_mistake_count(), 1);
    }
}

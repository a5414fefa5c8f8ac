// error.rs — Error types for the gate.
//
// These are collaborator failures only. A call the gate turns away is not
// an error; it is a `GateOutcome::Rejected`.

use std::path::PathBuf;

use thiserror::Error;

use crate::approval::ApprovalError;
use crate::executor::ExecutorError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The intents file could not be read or parsed.
    #[error("intent store error: {0}")]
    Intent(#[from] ig_intent::IntentError),

    /// A baseline read failed for a reason other than a missing file.
    #[error("workspace error: {0}")]
    Lock(#[from] ig_workspace::LockError),

    #[error("trace ledger error: {0}")]
    Audit(#[from] ig_audit::AuditError),

    #[error("policy error: {0}")]
    Policy(#[from] ig_policy::PolicyError),

    #[error("approval channel error: {0}")]
    Approval(#[from] ApprovalError),

    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),

    /// The settings file exists but could not be read.
    #[error("failed to read settings at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the gate settings.
    #[error("invalid settings at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

// error.rs — Error types for the trace ledger.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading the trace ledger.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to create the ledger's parent directory.
    #[error("failed to create ledger directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open or create the ledger file.
    #[error("failed to open trace ledger at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a record to the ledger.
    #[error("failed to append trace record: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("ledger lock poisoned: {0}")]
    LockPoisoned(String),

    /// A ledger line is not a well-formed trace record.
    #[error("invalid trace record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

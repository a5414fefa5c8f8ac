// error.rs — Error types for the verification runner.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The remediation log could not be created or appended to.
    #[error("failed to write verification log at {path}: {source}")]
    LogWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

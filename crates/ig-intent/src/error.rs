// error.rs — Error types for the intent store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the intents file.
#[derive(Debug, Error)]
pub enum IntentError {
    /// The intents file could not be read.
    #[error("failed to read intents file at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The intents file is not a valid intent document.
    #[error("malformed intents file at {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

// error.rs — Error types for the policy subsystem.

use thiserror::Error;

/// Errors that can occur while building policy components.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A configured shell danger pattern is not a valid regular expression.
    #[error("invalid danger pattern '{pattern}': {reason}")]
    InvalidDangerPattern { pattern: String, reason: String },

    /// A mutation class string is not one of the closed set.
    #[error("unknown mutation class '{0}'")]
    UnknownMutationClass(String),
}

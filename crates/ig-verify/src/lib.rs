//! # ig-verify
//!
//! Runs the project's test command after a mutation and, when it fails,
//! appends a remediation note to a human-readable Markdown log.
//!
//! The runner never retries; retry policy belongs to the calling agent loop.

pub mod error;
pub mod remediation;
pub mod runner;

pub use error::VerifyError;
pub use remediation::{build_guidance, format_log_entry, format_summary, truncate_output};
pub use runner::{VerificationResult, VerificationRunner, VerifyRequest, DEFAULT_TEST_COMMAND};

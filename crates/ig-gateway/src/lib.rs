//! # ig-gateway
//!
//! The governance gate every agent tool call passes through before its
//! real-world effect runs.
//!
//! The gate requires the agent to declare an active intent, keeps mutations
//! inside that intent's owned scope, checks provenance metadata on file
//! writes, asks a human before destructive calls, rejects writes based on
//! stale reads, and appends a content-hashed trace record for every
//! accepted full-file write.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use ig_gateway::{ExecutorError, FixedApproval, Gate, GatewayConfig, SessionStore};
//! use ig_policy::ToolInvocation;
//!
//! let config = GatewayConfig::load(".").unwrap();
//! let gate = Gate::from_config(&config, Box::new(FixedApproval::approve())).unwrap();
//! let sessions = SessionStore::new(&config.workspace_root);
//! let session = sessions.open("conversation-1").unwrap();
//!
//! let select = ToolInvocation::new("select_active_intent").with_arg("intent_id", "INT-001");
//! let run = |_: &ToolInvocation| -> Result<String, ExecutorError> { Ok(String::new()) };
//! let outcome = gate.run_tool(&session, &select, &run).unwrap();
//! ```

pub mod approval;
pub mod config;
pub mod error;
pub mod executor;
pub mod gate;
pub mod response;
pub mod session;

pub use approval::{ApprovalChannel, ApprovalError, FixedApproval, TerminalApproval};
pub use config::{GateSettings, GatewayConfig, ShellSettings, VerificationSettings};
pub use error::GatewayError;
pub use executor::{ExecutorError, ToolExecutor};
pub use gate::Gate;
pub use response::{GateOutcome, Rejection, RejectionKind, ToolError};
pub use session::{SessionHandle, SessionState, SessionStore};

//! # ig-policy
//!
//! Tool classification and scope matching for Intent Gate.
//!
//! Every tool call an agent issues is normalized into a [`ToolCall`] once,
//! at the gate's entry, and then classified by the [`Classifier`] as
//! [`Classification::Safe`], [`Classification::Destructive`] or
//! [`Classification::Unknown`]. Only destructive calls are routed through
//! the mutation guard and human approval.
//!
//! ## Key invariants
//!
//! - **Explicit default**: tool names in neither allow-list classify as
//!   `Unknown`, which downstream treats like `Safe`.
//! - **Shell re-classification**: `execute_command` is destructive only when
//!   its command matches a danger pattern; otherwise it is `Unknown`.
//! - **Dotfiles in scope**: `owned_scope` globs match paths beginning with a
//!   dot just like any other path.

pub mod classifier;
pub mod error;
pub mod scope;
pub mod tool;

pub use classifier::{Classification, Classifier, BUILTIN_DANGER_PATTERNS};
pub use error::PolicyError;
pub use scope::{matches_scope, path_in_scope};
pub use tool::{MutationClass, ToolCall, ToolInvocation, ToolKind};

//! # ig-intent
//!
//! Active intent store for Intent Gate.
//!
//! An [`Intent`] is a declared unit of work with an owned scope of glob
//! patterns. Intents are planned and edited outside this system; the
//! [`IntentStore`] only reads them, re-loading the intents file on every
//! lookup so a revoked or edited intent is observed on the next check.
//!
//! ## Key components
//!
//! - [`Intent`] / [`IntentStatus`] — the intent record
//! - [`IntentStore`] — YAML-backed read-only accessor with scope checks
//! - [`intent_context_xml`] — the payload returned on a successful selection
//! - [`select_active_intent_tool`] — function-tool definition for agent runtimes

pub mod context;
pub mod error;
pub mod intent;
pub mod store;

pub use context::{escape_xml, intent_context_xml, select_active_intent_tool};
pub use error::IntentError;
pub use intent::{Intent, IntentState, IntentStatus};
pub use store::IntentStore;

//! # ig-audit
//!
//! Append-only agent trace ledger for Intent Gate.
//!
//! Every accepted full-file write is recorded as a [`TraceRecord`] in a
//! JSONL file: one self-contained JSON object per line, carrying the
//! `sha256:` content hash of the written file, the line range it covers,
//! the governing intent and the mutation class.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use ig_audit::{TraceLedger, TraceSettings, WriteTrace};
//!
//! let ledger = TraceLedger::new("/tmp/ws", ".orchestration/agent_trace.jsonl", TraceSettings::default());
//! ledger
//!     .append(&WriteTrace {
//!         path: "src/main.rs",
//!         content: "fn main() {}\n",
//!         intent_id: "INT-001",
//!         mutation_class: "AST_REFACTOR",
//!     })
//!     .unwrap();
//! ```

pub mod error;
pub mod hasher;
pub mod ledger;
pub mod record;
pub mod vcs;

pub use error::AuditError;
pub use ledger::{TraceLedger, TraceSettings, WriteTrace};
pub use record::{
    Contributor, Conversation, FileTrace, LineRange, Related, TraceRecord, VcsInfo, TRACE_VERSION,
};

//! # ig-workspace
//!
//! Optimistic locking for agent file edits.
//!
//! A session records a content hash when it reads a file and checks that
//! hash again before it writes. If the bytes on disk changed in between,
//! the write is stale and must be re-planned against the new content.

pub mod error;
pub mod lock;

pub use error::LockError;
pub use lock::OptimisticLockTracker;

// lock.rs — Per-session read baselines and staleness checks.
//
// Each path moves through NO_BASELINE -> BASELINED -> (STALE | BASELINED).
// Only a read creates a baseline. A write the session performs itself can
// move an existing baseline forward, but never creates one, so a path the
// session never read is never stale.
//
// Comparison is by SHA-256 of the file bytes, not mtime, so a touch that
// leaves the content unchanged never makes a write stale. The digest is the
// plain hex form from `ig_audit::hasher`, the same function the trace ledger
// uses for its `sha256:` content hashes.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ig_audit::hasher::hash_bytes;

use crate::error::LockError;

/// Tracks the content hash each file had when the session last read it.
///
/// Paths are workspace-relative and resolved against `root`. Baselines are
/// keyed by the path string exactly as the agent supplied it, so
/// `src/a.ts` and `./src/a.ts` are tracked separately. Agents repeat the
/// path they read from when they write back, and a mismatch can only miss
/// a stale check, never invent one.
///
/// The tracker holds hashes, not file contents. A session that reads
/// thousands of files keeps 64 bytes of hex per path.
///
/// There is no interior locking. The tracker lives inside a session's
/// state and is mutated only while that session's mutex is held.
#[derive(Debug, Clone)]
pub struct OptimisticLockTracker {
    root: PathBuf,
    baselines: HashMap<String, String>,
}

impl OptimisticLockTracker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            baselines: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot the current content of `path`.
    ///
    /// A missing file drops any previous baseline and is not an error.
    pub fn record_baseline(&mut self, path: &str) -> Result<(), LockError> {
        match self.read(path)? {
            Some(bytes) => {
                let digest = hash_bytes(&bytes);
                tracing::debug!(path, hash = %digest, "recorded read baseline");
                self.baselines.insert(path.to_string(), digest);
            }
            None => {
                tracing::debug!(path, "read target missing; baseline cleared");
                self.baselines.remove(path);
            }
        }
        Ok(())
    }

    /// Whether `path` changed on disk since its baseline was recorded.
    ///
    /// No baseline means nothing to compare, so never stale. A file that
    /// vanished after being baselined is stale.
    pub fn is_stale(&self, path: &str) -> Result<bool, LockError> {
        let Some(expected) = self.baselines.get(path) else {
            return Ok(false);
        };
        let stale = match self.read(path)? {
            Some(bytes) => hash_bytes(&bytes) != *expected,
            None => true,
        };
        if stale {
            tracing::debug!(path, "file changed since last read");
        }
        Ok(stale)
    }

    /// Move an existing baseline forward to content this session has just
    /// written itself.
    ///
    /// Without this, the session's own write would make its next write to
    /// the same file look stale. A path with no baseline is left alone:
    /// only a read may start tracking a file.
    pub fn record_written(&mut self, path: &str, content: &str) {
        if let Some(baseline) = self.baselines.get_mut(path) {
            *baseline = hash_bytes(content.as_bytes());
            tracing::debug!(path, hash = %baseline, "baseline moved to own write");
        }
    }

    /// The recorded baseline hash for `path`, if any.
    pub fn baseline(&self, path: &str) -> Option<&str> {
        self.baselines.get(path).map(String::as_str)
    }

    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, LockError> {
        let abs = self.root.join(path);
        match fs::read(&abs) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LockError::Io { path: abs, source }),
        }
    }
}

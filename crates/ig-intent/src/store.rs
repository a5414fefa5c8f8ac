// store.rs — IntentStore: read-only access to the active intents file.
//
// The file is the source of truth and is maintained by an external planning
// process. Every call re-reads it; nothing is cached between calls, so an
// intent removed from the file is gone on the very next lookup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IntentError;
use crate::intent::{Intent, IntentState};

/// Read-only accessor over the intents YAML file.
#[derive(Debug, Clone)]
pub struct IntentStore {
    path: PathBuf,
}

impl IntentStore {
    /// Create a store backed by the file at `path`. The file is not read
    /// until the first lookup.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the intents file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full intents document from disk.
    ///
    /// A missing file is an error; an empty file is an empty document.
    pub fn load(&self) -> Result<IntentState, IntentError> {
        let content = fs::read_to_string(&self.path).map_err(|source| IntentError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(IntentState::default());
        }
        serde_yaml::from_str(&content).map_err(|source| IntentError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// All intents in file order.
    pub fn list(&self) -> Result<Vec<Intent>, IntentError> {
        Ok(self.load()?.active_intents)
    }

    /// Look up an intent by exact id.
    pub fn lookup(&self, id: &str) -> Result<Option<Intent>, IntentError> {
        let found = self
            .load()?
            .active_intents
            .into_iter()
            .find(|intent| intent.id == id);
        tracing::debug!(intent_id = id, found = found.is_some(), "intent lookup");
        Ok(found)
    }

    /// Whether `path` is inside the intent's owned scope.
    pub fn in_scope(&self, intent: &Intent, path: &str) -> bool {
        intent.in_scope(path)
    }
}

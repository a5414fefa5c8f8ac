// session.rs — Per-conversation gate state and its store.
//
// Each agent conversation owns one SessionState: the selected intent, the
// consecutive mistake counter and the read baselines. The store hands out
// handles; the gate locks a session for the whole of one invocation, so
// calls within a session are strictly sequential while separate sessions
// proceed in parallel.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use ig_intent::Intent;
use ig_workspace::OptimisticLockTracker;

use crate::error::GatewayError;

#[derive(Debug)]
pub struct SessionState {
    id: String,

    /// Last successfully selected (or re-validated) intent.
    pub(crate) selected_intent: Option<Intent>,

    pub(crate) consecutive_mistake_count: u32,

    pub(crate) locks: OptimisticLockTracker,
}

impl SessionState {
    pub fn new(id: impl Into<String>, workspace_root: impl AsRef<Path>) -> Self {
        Self {
            id: id.into(),
            selected_intent: None,
            consecutive_mistake_count: 0,
            locks: OptimisticLockTracker::new(workspace_root),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn selected_intent(&self) -> Option<&Intent> {
        self.selected_intent.as_ref()
    }

    pub fn selected_intent_id(&self) -> Option<&str> {
        self.selected_intent.as_ref().map(|i| i.id.as_str())
    }

    pub fn consecutive_mistake_count(&self) -> u32 {
        self.consecutive_mistake_count
    }

    pub fn locks(&self) -> &OptimisticLockTracker {
        &self.locks
    }
}

/// Shared handle to one session's state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: String,
    state: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Exclusive access for the duration of one invocation.
    pub fn lock(&self) -> Result<MutexGuard<'_, SessionState>, GatewayError> {
        self.state
            .lock()
            .map_err(|e| GatewayError::LockPoisoned(format!("session {}: {}", self.id, e)))
    }
}

/// All live sessions of one gate process, keyed by conversation id.
#[derive(Debug)]
pub struct SessionStore {
    workspace_root: PathBuf,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    pub fn new(workspace_root: impl AsRef<Path>) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<String, SessionHandle>>, GatewayError> {
        self.sessions
            .lock()
            .map_err(|e| GatewayError::LockPoisoned(format!("session store: {}", e)))
    }

    /// Start a session. Opening an id that is already live returns the
    /// existing handle unchanged.
    pub fn open(&self, id: &str) -> Result<SessionHandle, GatewayError> {
        let mut sessions = self.sessions()?;
        let handle = sessions.entry(id.to_string()).or_insert_with(|| {
            tracing::info!(session = id, "session opened");
            SessionHandle {
                id: id.to_string(),
                state: Arc::new(Mutex::new(SessionState::new(id, &self.workspace_root))),
            }
        });
        Ok(handle.clone())
    }

    pub fn get(&self, id: &str) -> Result<Option<SessionHandle>, GatewayError> {
        Ok(self.sessions()?.get(id).cloned())
    }

    /// Discard a session's state. Returns whether it existed.
    pub fn close(&self, id: &str) -> Result<bool, GatewayError> {
        let removed = self.sessions()?.remove(id).is_some();
        if removed {
            tracing::info!(session = id, "session closed");
        }
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize, GatewayError> {
        Ok(self.sessions()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, GatewayError> {
        Ok(self.len()? == 0)
    }
}

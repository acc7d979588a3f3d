//! In-memory session bookkeeping for planning runs
//!
//! One record per run, keyed by a random session id. Records live as long as
//! the store; nothing is persisted.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// Per-run state and memory journal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub state: Map<String, Value>,
    pub memory: Vec<Value>,
}

/// Process-wide session registry, shared by handle
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionRecord>> {
        // Every write is a single map operation, so a poisoned map is still consistent.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a record seeded with `initial` state and return its id
    pub fn create_session(&self, initial: Map<String, Value>) -> String {
        let session_id = Uuid::new_v4().to_string();
        let record = SessionRecord {
            session_id: session_id.clone(),
            state: initial,
            memory: Vec::new(),
        };
        self.sessions().insert(session_id.clone(), record);
        debug!("Created session {}", session_id);
        session_id
    }

    /// State of a session; empty for unknown ids
    #[must_use]
    pub fn get_state(&self, session_id: &str) -> Map<String, Value> {
        self.sessions()
            .get(session_id)
            .map(|record| record.state.clone())
            .unwrap_or_default()
    }

    /// Set one state key, creating the record if needed
    pub fn set_state_value(&self, session_id: &str, key: &str, value: impl Into<Value>) {
        self.sessions()
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRecord {
                session_id: session_id.to_string(),
                ..SessionRecord::default()
            })
            .state
            .insert(key.to_string(), value.into());
    }

    /// Append a journal item, creating the record if needed
    pub fn append_memory(&self, session_id: &str, item: impl Into<Value>) {
        self.sessions()
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRecord {
                session_id: session_id.to_string(),
                ..SessionRecord::default()
            })
            .memory
            .push(item.into());
    }

    /// Journal of a session; empty for unknown ids
    #[must_use]
    pub fn get_memory(&self, session_id: &str) -> Vec<Value> {
        self.sessions()
            .get(session_id)
            .map(|record| record.memory.clone())
            .unwrap_or_default()
    }

    /// Snapshot of a whole record
    #[must_use]
    pub fn record(&self, session_id: &str) -> Option<SessionRecord> {
        self.sessions().get(session_id).cloned()
    }

    /// Ids of every known session, in no particular order
    #[must_use]
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }
}

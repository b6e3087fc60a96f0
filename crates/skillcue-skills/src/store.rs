//! Conversation state persistence.
//!
//! One JSON document per conversation, read whole and overwritten whole.
//! Single writer; no locking or atomic rename.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::errors::{Result, SkillError};
use crate::types::ConversationState;

/// Durable storage for one conversation's state.
pub trait StateStore {
    /// Load the stored state. `Ok(None)` if nothing has been stored yet.
    fn load(&self) -> Result<Option<ConversationState>>;

    /// Replace the stored state.
    fn save(&self, state: &ConversationState) -> Result<()>;
}

/// State stored as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`. The parent directory is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<ConversationState>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "state file not found");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| SkillError::Io {
            path: self.path.clone(),
            source,
        })?;
        let state = serde_json::from_str(&content).map_err(|source| SkillError::InvalidState {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(state))
    }

    fn save(&self, state: &ConversationState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SkillError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json).map_err(|source| SkillError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

/// In-memory store for embedding and tests. Counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: Option<ConversationState>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `state`.
    pub fn with_state(state: ConversationState) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                state: Some(state),
                saves: 0,
            }),
        }
    }

    /// Copy of the stored state.
    pub fn snapshot(&self) -> Option<ConversationState> {
        self.inner.lock().state.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.lock().saves
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<ConversationState>> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &ConversationState) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn load(&self) -> Result<Option<ConversationState>> {
        (**self).load()
    }

    fn save(&self, state: &ConversationState) -> Result<()> {
        (**self).save(state)
    }
}

//! Key-value preference storage.
//!
//! Every persisted slot (the project list, the project and task
//! snapshots, and the last-selected tab/project) lives under one
//! [`PreferenceKey`]. Backends store opaque strings; (de)serialization
//! of the records is the caller's concern.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// The persisted slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    ProjectList,
    Projects,
    Tasks,
    CurrentTab,
    CurrentProjectId,
}

impl PreferenceKey {
    /// Stable storage name for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectList => "project_list",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::CurrentTab => "current_tab",
            Self::CurrentProjectId => "current_project_id",
        }
    }
}

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Preference storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preference data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A place preference values live.
#[async_trait]
pub trait PreferenceBackend: Send + Sync {
    /// Fetch the value for `key`, or `None` when never set.
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: PreferenceKey, value: String) -> Result<(), StoreError>;

    /// Drop `key` entirely.
    async fn remove(&self, key: PreferenceKey) -> Result<(), StoreError>;
}

/// File-backed preferences: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    dir: PathBuf,
}

impl FilePreferences {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: PreferenceKey) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

#[async_trait]
impl PreferenceBackend for FilePreferences {
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, StoreError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    async fn set(&self, key: PreferenceKey, value: String) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    async fn remove(&self, key: PreferenceKey) -> Result<(), StoreError> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory preferences, for tests and mock-data mode.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<PreferenceKey, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceBackend for MemoryPreferences {
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn set(&self, key: PreferenceKey, value: String) -> Result<(), StoreError> {
        self.values.write().await.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: PreferenceKey) -> Result<(), StoreError> {
        self.values.write().await.remove(&key);
        Ok(())
    }
}

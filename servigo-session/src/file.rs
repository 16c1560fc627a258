//! File-backed session store
//!
//! Persists the session as a single JSON document so the identity state
//! survives restarts, mirroring browser-origin persistent storage.

use serde::{Deserialize, Serialize};
use servigo_core::{ErrorContext, ServigoError, ServigoResult, SessionStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Serializable session document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionDocument {
    entries: HashMap<String, String>,
}

/// Session store persisted to a JSON file
///
/// Every mutation is written through to disk before it returns, so a clear
/// followed by further calls never observes stale state.
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Open a store at the given path, loading any existing document
    pub fn open<P: AsRef<Path>>(path: P) -> ServigoResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ServigoError::Storage {
                message: format!("Failed to create session store directory: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("file_session_store")
                    .with_operation("open")
                    .with_suggestion("Check if the session store path is writable"),
            })?;
        }

        let entries = if path.exists() {
            let json_data =
                std::fs::read_to_string(&path).map_err(|e| ServigoError::Storage {
                    message: format!("Failed to read session file: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("file_session_store").with_operation("open"),
                })?;

            let document: SessionDocument =
                serde_json::from_str(&json_data).map_err(ServigoError::Serialization)?;
            document.entries
        } else {
            HashMap::new()
        };

        info!("Session store opened at: {}", path.display());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> ServigoResult<()> {
        let document = SessionDocument {
            entries: entries.clone(),
        };

        let json_data =
            serde_json::to_string_pretty(&document).map_err(ServigoError::Serialization)?;

        std::fs::write(&self.path, json_data).map_err(|e| ServigoError::Storage {
            message: format!("Failed to write session file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_session_store")
                .with_operation("persist")
                .with_suggestion("Check if the session store path is writable"),
        })?;

        debug!("Persisted session store to {}", self.path.display());
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self, key: &str) -> ServigoResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> ServigoResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> ServigoResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.remove(key).is_some() {
            return self.persist(&entries);
        }
        Ok(())
    }

    fn clear_all(&self) -> ServigoResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.persist(&entries)
    }
}

//! Navigation seam
//!
//! The gateway's termination subscriber and the router both need to know
//! where the user currently is and to move them; this trait decouples that
//! from any concrete UI shell.

use std::sync::RwLock;

/// Current-location tracking and movement
pub trait Navigator: Send + Sync {
    /// Path the user is currently on
    fn current_path(&self) -> String;

    /// Move to the given path
    fn navigate(&self, path: &str);
}

/// In-memory navigator recording the visit history
///
/// Suitable for tests and headless use; a UI shell provides its own
/// implementation bound to its rendering layer.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: RwLock<Vec<String>>,
}

impl MemoryNavigator {
    /// Start at the given path
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            history: RwLock::new(vec![path.into()]),
        }
    }

    /// All visited paths, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::starting_at("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        let history = self.history.read().unwrap_or_else(|e| e.into_inner());
        history.last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        let mut history = self.history.write().unwrap_or_else(|e| e.into_inner());
        history.push(path.to_string());
    }
}

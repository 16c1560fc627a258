//! Core trait definitions

use crate::error::ServigoResult;

/// Process-wide key-value session store
///
/// Backs every other component: the interceptors read the credential from
/// it, the navigation guard reads the role, and the response interceptor
/// clears it on session termination. Implementations provide atomic per-key
/// read/write; `clear_all` removes every key in one logical operation.
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn read(&self, key: &str) -> ServigoResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn write(&self, key: &str, value: &str) -> ServigoResult<()>;

    /// Remove a single key; removing an absent key is a no-op
    fn remove(&self, key: &str) -> ServigoResult<()>;

    /// Remove every key. Clearing an already-cleared store is a no-op.
    fn clear_all(&self) -> ServigoResult<()>;
}

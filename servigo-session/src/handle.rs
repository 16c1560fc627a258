//! Typed facade over a session store

use servigo_core::{
    Role, ServigoResult, Session, SessionStore, Theme, ROLE_KEY, THEME_KEY, TOKEN_KEY,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Shared handle to the session store with typed accessors
///
/// Cloning the handle shares the underlying store; both interceptors and
/// the navigation guard hold one, so a clear performed by the response
/// interceptor is immediately visible everywhere.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Access the underlying key-value store
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub fn token(&self) -> ServigoResult<Option<String>> {
        self.store.read(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> ServigoResult<()> {
        self.store.write(TOKEN_KEY, token)
    }

    pub fn role(&self) -> ServigoResult<Option<Role>> {
        let value = self.store.read(ROLE_KEY)?;
        Ok(value.and_then(|raw| match Role::from_str(&raw) {
            Ok(role) => Some(role),
            Err(e) => {
                // A corrupted role entry is treated as absent rather than
                // failing every read on the hot path.
                warn!("Ignoring stored role: {}", e);
                None
            }
        }))
    }

    pub fn set_role(&self, role: Role) -> ServigoResult<()> {
        self.store.write(ROLE_KEY, &role.to_string())
    }

    pub fn theme(&self) -> ServigoResult<Theme> {
        let value = self.store.read(THEME_KEY)?;
        Ok(value
            .and_then(|raw| Theme::from_str(&raw).ok())
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> ServigoResult<()> {
        self.store.write(THEME_KEY, &theme.to_string())
    }

    /// Snapshot of the current session state
    pub fn session(&self) -> ServigoResult<Session> {
        Ok(Session {
            token: self.token()?,
            role: self.role()?,
        })
    }

    /// Clear the whole session in one logical operation
    pub fn clear(&self) -> ServigoResult<()> {
        self.store.clear_all()
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

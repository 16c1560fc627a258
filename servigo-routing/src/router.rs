//! Router facade
//!
//! Ties the route table, the guard and the navigator together: one
//! `navigate` call performs the lookup, runs the guard against the current
//! session and moves the navigator to the resolved destination.

use crate::guard::{NavigationDecision, NavigationGuard};
use crate::navigator::Navigator;
use crate::routes::RouteTable;
use servigo_core::ServigoResult;
use servigo_session::SessionHandle;
use std::sync::Arc;
use tracing::debug;

pub struct Router {
    table: RouteTable,
    navigator: Arc<dyn Navigator>,
    session: SessionHandle,
}

impl Router {
    pub fn new(table: RouteTable, navigator: Arc<dyn Navigator>, session: SessionHandle) -> Self {
        Self {
            table,
            navigator,
            session,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current_path(&self) -> String {
        self.navigator.current_path()
    }

    /// Attempt a transition to `path`
    ///
    /// The guard's decision is applied immediately: the navigator ends up
    /// on the requested path or on the redirect destination. The decision
    /// is returned so callers can distinguish the two, but never an error.
    pub fn navigate(&self, path: &str) -> ServigoResult<NavigationDecision> {
        let session = self.session.session()?;
        let decision = NavigationGuard::decide(self.table.find(path), &session);

        let destination = decision.resolve(path);
        debug!(requested = path, destination, "Route transition");
        self.navigator.navigate(destination);

        Ok(decision)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .finish_non_exhaustive()
    }
}

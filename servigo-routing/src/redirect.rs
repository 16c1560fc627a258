//! Session-termination redirect subscriber
//!
//! The gateway clears the store and publishes a `SessionEvent`; this
//! subscriber owns the navigation reaction, redirecting to the login route
//! unless the user is already there. Keeping the redirect here means the
//! HTTP layer never touches the router and both sides test in isolation.

use crate::navigator::Navigator;
use servigo_gateway::SessionEvent;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// React to a single session event
///
/// Returns the redirect target when a navigation was performed.
pub fn handle_session_event(
    event: &SessionEvent,
    navigator: &dyn Navigator,
    login_route: &str,
) -> Option<String> {
    match event {
        SessionEvent::Terminated { .. } | SessionEvent::LoggedOut => {
            if let Some(notice) = event.notice() {
                warn!(notice, "Session terminated with user notice");
            }

            let current = navigator.current_path();
            if current == login_route {
                debug!("Already at the login route, no redirect");
                return None;
            }

            info!(from = %current, to = %login_route, "Redirecting after session end");
            navigator.navigate(login_route);
            Some(login_route.to_string())
        }
    }
}

/// Subscribe to session events and perform redirects until the channel closes
pub fn spawn_redirect_subscriber(
    mut events: broadcast::Receiver<SessionEvent>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    handle_session_event(&event, navigator.as_ref(), &login_route);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Redirects collapse: reacting to the latest event is
                    // enough, earlier ones targeted the same route.
                    warn!(skipped, "Redirect subscriber lagged behind session events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

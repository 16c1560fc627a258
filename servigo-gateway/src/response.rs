//! Response interceptor
//!
//! Inspects failed responses for the two session-terminating cases: a 403
//! carrying the "blocked" policy marker, and a plain 401. Both clear the
//! session store and publish a termination event; the original failure is
//! then re-raised so the caller still observes it. Every other failure
//! passes through untouched, and successful responses are never inspected.

use crate::events::{SessionEvent, TerminationReason};
use crate::GatewayError;
use serde::Deserialize;
use servigo_session::SessionHandle;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Marker substring identifying a policy-revoked account in the error body
const BLOCKED_MARKER: &str = "blocked";

/// Error body shape the backend uses on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// What the interceptor needs to know about a failed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    pub error_message: Option<String>,
}

impl ResponseSummary {
    pub fn new(status: u16, error_message: Option<impl Into<String>>) -> Self {
        Self {
            status,
            error_message: error_message.map(Into::into),
        }
    }

    /// Extract a summary from a failed HTTP response, consuming its body
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();

        let error_message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error),
            Err(e) => {
                debug!("Failed to read error body: {}", e);
                None
            }
        };

        Self {
            status,
            error_message,
        }
    }

    /// Classify the failure into the gateway error taxonomy
    pub fn classify(self) -> GatewayError {
        let message = self.error_message.unwrap_or_default();

        match self.status {
            403 if message.contains(BLOCKED_MARKER) => {
                GatewayError::BlockedAccount { message }
            }
            401 => GatewayError::Unauthorized {
                message: if message.is_empty() {
                    None
                } else {
                    Some(message)
                },
            },
            status => GatewayError::Http { status, message },
        }
    }
}

/// Applies session-termination effects to classified failures
#[derive(Debug)]
pub struct ResponseInterceptor {
    session: SessionHandle,
    events: broadcast::Sender<SessionEvent>,
}

impl ResponseInterceptor {
    pub fn new(session: SessionHandle, events: broadcast::Sender<SessionEvent>) -> Self {
        Self { session, events }
    }

    /// Intercept a classified failure, returning it unchanged
    ///
    /// Session-terminating failures clear the store before the event is
    /// published, so no subscriber can observe the terminated session with
    /// its stale credentials still present. Repeated terminations are safe:
    /// clearing an already-cleared store is a no-op.
    pub fn on_failure(&self, error: GatewayError) -> GatewayError {
        match &error {
            GatewayError::BlockedAccount { message } => {
                warn!("Account blocked by policy, terminating session");
                self.terminate(TerminationReason::Blocked {
                    message: message.clone(),
                });
            }
            GatewayError::Unauthorized { .. } => {
                warn!("Unauthorized response, terminating session");
                self.terminate(TerminationReason::Unauthorized);
            }
            _ => {}
        }

        error
    }

    fn terminate(&self, reason: TerminationReason) {
        if let Err(e) = self.session.clear() {
            // The original failure must still reach the caller; a failed
            // clear is logged, not raised.
            e.log();
        }

        let _ = self.events.send(SessionEvent::Terminated { reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servigo_core::Role;
    use servigo_session::MemorySessionStore;
    use std::sync::Arc;

    fn authenticated_session() -> SessionHandle {
        let session = SessionHandle::new(Arc::new(MemorySessionStore::new()));
        session.set_token("abc").unwrap();
        session.set_role(Role::Customer).unwrap();
        session
    }

    fn interceptor(
        session: SessionHandle,
    ) -> (ResponseInterceptor, broadcast::Receiver<SessionEvent>) {
        let (events, rx) = broadcast::channel(16);
        (ResponseInterceptor::new(session, events), rx)
    }

    #[test]
    fn test_classify_blocked_account() {
        let summary = ResponseSummary::new(403, Some("User is blocked by admin"));
        assert!(matches!(
            summary.classify(),
            GatewayError::BlockedAccount { .. }
        ));
    }

    #[test]
    fn test_classify_plain_403_is_not_blocked() {
        let summary = ResponseSummary::new(403, Some("Not authorized."));
        assert!(matches!(
            summary.classify(),
            GatewayError::Http { status: 403, .. }
        ));
    }

    #[test]
    fn test_classify_unauthorized() {
        let summary = ResponseSummary::new(401, Some("Incorrect password"));
        assert!(matches!(
            summary.classify(),
            GatewayError::Unauthorized { .. }
        ));
    }

    #[test]
    fn test_classify_other_failure() {
        let summary = ResponseSummary::new(500, None::<String>);
        assert!(matches!(
            summary.classify(),
            GatewayError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn test_blocked_clears_session_and_emits_notice() {
        let session = authenticated_session();
        let (interceptor, mut rx) = interceptor(session.clone());

        let error = ResponseSummary::new(403, Some("User is blocked by admin")).classify();
        let error = interceptor.on_failure(error);

        // original failure re-surfaced
        assert!(matches!(error, GatewayError::BlockedAccount { .. }));

        // session fully cleared
        assert_eq!(session.token().unwrap(), None);
        assert_eq!(session.role().unwrap(), None);

        // event carries the user-visible notice
        let event = rx.try_recv().unwrap();
        assert_eq!(event.notice(), Some("User is blocked by admin"));
    }

    #[test]
    fn test_unauthorized_clears_session_silently() {
        let session = authenticated_session();
        let (interceptor, mut rx) = interceptor(session.clone());

        let error = interceptor.on_failure(ResponseSummary::new(401, None::<String>).classify());

        assert!(matches!(error, GatewayError::Unauthorized { .. }));
        assert_eq!(session.token().unwrap(), None);
        assert_eq!(session.role().unwrap(), None);

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            SessionEvent::Terminated {
                reason: TerminationReason::Unauthorized
            }
        );
        assert_eq!(event.notice(), None);
    }

    #[test]
    fn test_other_failures_leave_session_untouched() {
        let session = authenticated_session();
        let (interceptor, mut rx) = interceptor(session.clone());

        for error in [
            ResponseSummary::new(404, Some("Service not found")).classify(),
            ResponseSummary::new(500, None::<String>).classify(),
            ResponseSummary::new(403, Some("Not authorized.")).classify(),
            GatewayError::Transport {
                message: "connection refused".to_string(),
                source: None,
            },
        ] {
            interceptor.on_failure(error);
        }

        assert_eq!(session.token().unwrap(), Some("abc".to_string()));
        assert_eq!(session.role().unwrap(), Some(Role::Customer));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_repeated_terminations_are_idempotent() {
        let session = authenticated_session();
        let (interceptor, mut rx) = interceptor(session.clone());

        interceptor.on_failure(ResponseSummary::new(401, None::<String>).classify());
        interceptor.on_failure(ResponseSummary::new(401, None::<String>).classify());

        assert_eq!(session.token().unwrap(), None);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}

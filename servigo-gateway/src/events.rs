//! Session lifecycle events
//!
//! The response interceptor publishes these on a broadcast channel after it
//! has cleared the store. Subscribers (the routing layer, a UI shell) react
//! with redirects or notices; the HTTP layer itself never navigates.

/// Why a session was terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The account was blocked by policy; carries the server's message for
    /// display to the user
    Blocked { message: String },
    /// The credential was rejected as expired or invalid; silent
    Unauthorized,
}

/// Event published when the session state changes outside a normal login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session was revoked by the server; the store is already cleared
    /// when this event is observed
    Terminated { reason: TerminationReason },
    /// The user logged out explicitly
    LoggedOut,
}

impl SessionEvent {
    /// User-visible notice attached to the event, if any
    ///
    /// Only the blocked case carries one; unauthorized terminations stay
    /// silent beyond the redirect.
    pub fn notice(&self) -> Option<&str> {
        match self {
            SessionEvent::Terminated {
                reason: TerminationReason::Blocked { message },
            } => Some(message),
            _ => None,
        }
    }
}

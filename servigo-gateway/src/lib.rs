//! Servigo Gateway - Client-side HTTP security pipeline
//!
//! Every outbound API call passes through the request interceptor (bearer
//! credential attachment) and every failed response through the response
//! interceptor (session-termination detection). The interceptors never
//! convert a failure into a success: they attach side effects and re-raise
//! the original failure, so callers can still react to it.
//!
//! Navigation is deliberately out of this crate: session termination is
//! published as a `SessionEvent` on a broadcast channel and the routing
//! layer subscribes to perform the redirect.

pub mod auth;
pub mod client;
pub mod config;
pub mod events;
pub mod request;
pub mod response;

pub use auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use events::{SessionEvent, TerminationReason};
pub use request::RequestInterceptor;
pub use response::{ResponseInterceptor, ResponseSummary};

use servigo_core::ServigoError;

/// Gateway-level error type
///
/// Mirrors the failure taxonomy the interceptors decide on. The session
/// terminating variants (`BlockedAccount`, `Unauthorized`) are still
/// surfaced to the caller after their side effects ran.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No response was received (timeout, DNS failure, refused connection)
    #[error("Transport failure: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// 403 carrying the policy-revocation marker
    #[error("Account blocked: {message}")]
    BlockedAccount { message: String },

    /// 401, an expired or invalid credential
    #[error("Unauthorized")]
    Unauthorized { message: Option<String> },

    /// Any other failure status, passed through untouched
    #[error("HTTP {status} error: {message}")]
    Http { status: u16, message: String },

    #[error("Core error: {0}")]
    Core(#[from] ServigoError),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// HTTP status of the failure, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::BlockedAccount { .. } => Some(403),
            GatewayError::Unauthorized { .. } => Some(401),
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure terminates the session
    pub fn is_session_terminating(&self) -> bool {
        matches!(
            self,
            GatewayError::BlockedAccount { .. } | GatewayError::Unauthorized { .. }
        )
    }
}
